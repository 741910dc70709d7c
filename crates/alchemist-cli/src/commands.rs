use anyhow::{Context, Result, bail};
use tracing::info;

use alchemist_cli::session::{
    FilterOutcome, WeightOverrides, filter_file, load_inputs, open_session,
};
use alchemist_core::suggest_rules_from_clients;
use alchemist_model::RulesDocument;
use alchemist_report::{
    ExportBundle, ValidationReport, export_bundle, write_validation_errors_json,
    write_validation_report,
};

use crate::cli::{ExportArgs, FilterArgs, RulesArgs, SuggestArgs, ValidateArgs};
use crate::types::{ExportResult, RulesResult, ValidateResult};

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let session = open_session(&args.inputs, args.rules.as_deref())?;
    let workbook = &session.workbook;
    if workbook.datasets().loaded().is_empty() {
        bail!("no client, worker or task CSV files found");
    }
    if let Some(path) = &args.errors_out {
        write_validation_errors_json(workbook.errors(), path)
            .with_context(|| format!("write {}", path.display()))?;
    }
    if let Some(path) = &args.report {
        let report = ValidationReport::new(workbook.datasets(), workbook.rules(), workbook.errors());
        write_validation_report(&report, path)
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(ValidateResult {
        session,
        errors_out: args.errors_out.clone(),
        report: args.report.clone(),
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<RulesResult> {
    let session = open_session(std::slice::from_ref(&args.data), Some(&args.rules_file))?;
    Ok(RulesResult {
        rules_file: args.rules_file.clone(),
        session,
    })
}

/// Suggested rules as a pretty JSON array.
pub fn run_suggest(args: &SuggestArgs) -> Result<String> {
    let datasets = load_inputs(std::slice::from_ref(&args.input))?;
    let Some(clients) = datasets.clients.as_ref() else {
        bail!("no clients table found in {}", args.input.display());
    };
    let suggestions = suggest_rules_from_clients(clients);
    info!(count = suggestions.len(), "rules suggested");
    let value = RulesDocument::new(suggestions, None)
        .to_json_value()
        .context("serialize suggestions")?;
    serde_json::to_string_pretty(&value).context("serialize suggestions")
}

pub fn run_filter(args: &FilterArgs) -> Result<FilterOutcome> {
    filter_file(&args.file, &args.query, args.entity.map(Into::into))
}

pub fn run_export(args: &ExportArgs) -> Result<ExportResult> {
    let mut session = open_session(&args.inputs, args.rules.as_deref())?;
    let overrides = WeightOverrides {
        preset: args.preset.map(Into::into),
        priority: args.priority,
        fairness: args.fairness,
        load: args.load,
    };
    let weights = overrides.apply(session.workbook.weights())?;
    session.workbook.set_weights(weights);

    let workbook = &session.workbook;
    let bundle = ExportBundle {
        datasets: workbook.datasets(),
        rules: workbook.rules(),
        weights,
        errors: workbook.errors(),
    };
    let written = export_bundle(bundle, &args.output_dir)
        .with_context(|| format!("export to {}", args.output_dir.display()))?;
    Ok(ExportResult {
        output_dir: args.output_dir.clone(),
        written,
        weights,
        session,
    })
}
