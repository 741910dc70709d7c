//! CLI argument definitions for Data Alchemist.

use std::path::PathBuf;

use alchemist_model::{Entity, WeightPreset};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "data-alchemist",
    version,
    about = "Data Alchemist - Validate client, worker and task spreadsheets",
    long_about = "Validate client, worker and task CSV files, check co-run rules for\n\
                  contradictions, and export cleaned data with a rules configuration."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate tables (and optionally a rule file) and print a summary.
    Validate(ValidateArgs),

    /// Check a rule file against loaded data.
    Rules(RulesArgs),

    /// Suggest co-run rules from client task requests.
    Suggest(SuggestArgs),

    /// Print the rows of a table matching a filter query.
    Filter(FilterArgs),

    /// Write cleaned CSVs, rules.json and validation_errors.json.
    Export(ExportArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Data folders or individual CSV files.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Rules file to check alongside the data.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Write the validation errors as JSON.
    #[arg(long = "errors-out", value_name = "PATH")]
    pub errors_out: Option<PathBuf>,

    /// Write a validation report with per-entity counts.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Rules file (JSON array of rules, optionally ending with weights).
    #[arg(value_name = "RULES")]
    pub rules_file: PathBuf,

    /// Data folder whose task table the rules refer to.
    #[arg(long = "data", value_name = "DIR")]
    pub data: PathBuf,
}

#[derive(Parser)]
pub struct SuggestArgs {
    /// Data folder or clients CSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Parser)]
pub struct FilterArgs {
    /// CSV file to filter.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Query such as "PriorityLevel > 3 AND GroupTag = A".
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Entity of the file when its name does not say.
    #[arg(long = "entity", value_enum)]
    pub entity: Option<EntityArg>,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Data folders or individual CSV files.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for the exported files.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Rules file to include in rules.json.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Weight preset (overrides weights from the rules file).
    #[arg(long = "preset", value_enum)]
    pub preset: Option<PresetArg>,

    /// Priority weight (0-10).
    #[arg(long = "priority", value_parser = clap::value_parser!(u8).range(0..=10))]
    pub priority: Option<u8>,

    /// Fairness weight (0-10).
    #[arg(long = "fairness", value_parser = clap::value_parser!(u8).range(0..=10))]
    pub fairness: Option<u8>,

    /// Load weight (0-10).
    #[arg(long = "load", value_parser = clap::value_parser!(u8).range(0..=10))]
    pub load: Option<u8>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum EntityArg {
    Clients,
    Workers,
    Tasks,
}

impl From<EntityArg> for Entity {
    fn from(value: EntityArg) -> Self {
        match value {
            EntityArg::Clients => Entity::Clients,
            EntityArg::Workers => Entity::Workers,
            EntityArg::Tasks => Entity::Tasks,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    MaximizeFulfillment,
    FairDistribution,
    MinimizeWorkload,
}

impl From<PresetArg> for WeightPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::MaximizeFulfillment => WeightPreset::MaximizeFulfillment,
            PresetArg::FairDistribution => WeightPreset::FairDistribution,
            PresetArg::MinimizeWorkload => WeightPreset::MinimizeWorkload,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
