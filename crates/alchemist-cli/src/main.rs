//! Data Alchemist CLI.

use alchemist_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_export, run_filter, run_rules, run_suggest, run_validate};
use crate::summary::{
    print_export_summary, print_filter_result, print_rules_summary, print_validation_summary,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Validate(args) => match run_validate(&args) {
            Ok(result) => {
                print_validation_summary(&result);
                if result.has_errors() { 1 } else { 0 }
            }
            Err(error) => report_failure(&error),
        },
        Command::Rules(args) => match run_rules(&args) {
            Ok(result) => {
                print_rules_summary(&result);
                if result.has_errors() { 1 } else { 0 }
            }
            Err(error) => report_failure(&error),
        },
        Command::Suggest(args) => match run_suggest(&args) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(error) => report_failure(&error),
        },
        Command::Filter(args) => match run_filter(&args) {
            Ok(outcome) => {
                print_filter_result(&outcome);
                0
            }
            Err(error) => report_failure(&error),
        },
        Command::Export(args) => match run_export(&args) {
            Ok(result) => {
                print_export_summary(&result);
                0
            }
            Err(error) => report_failure(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_failure(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
