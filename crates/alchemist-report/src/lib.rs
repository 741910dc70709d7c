//! Export of cleaned tables, rule configuration and validation results.

pub mod csv_export;
pub mod error;
pub mod json_export;
pub mod report;

use std::path::{Path, PathBuf};

use alchemist_model::{Datasets, PrioritizationWeights, Rule, ValidationError};

pub use csv_export::{cleaned_csv_bytes, cleaned_file_name, write_cleaned_csv};
pub use error::{ReportError, Result};
pub use json_export::{rules_json, write_rules_json, write_validation_errors_json};
pub use report::{EntitySummary, ValidationReport, write_validation_report};

pub const RULES_FILE_NAME: &str = "rules.json";
pub const ERRORS_FILE_NAME: &str = "validation_errors.json";

/// Everything one export writes.
#[derive(Debug, Clone, Copy)]
pub struct ExportBundle<'a> {
    pub datasets: &'a Datasets,
    pub rules: &'a [Rule],
    pub weights: PrioritizationWeights,
    pub errors: &'a [ValidationError],
}

/// Writes cleaned CSVs for every non-empty loaded table, `rules.json` and
/// `validation_errors.json` into `output_dir`. Returns the written paths.
pub fn export_bundle(bundle: ExportBundle<'_>, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for entity in bundle.datasets.loaded() {
        let Some(table) = bundle.datasets.get(entity) else {
            continue;
        };
        if table.is_empty() {
            tracing::warn!(entity = %entity, "skipping export of empty table");
            continue;
        }
        let path = output_dir.join(cleaned_file_name(table));
        write_cleaned_csv(table, &path)?;
        written.push(path);
    }

    let rules_path = output_dir.join(RULES_FILE_NAME);
    write_rules_json(bundle.rules, bundle.weights, &rules_path)?;
    written.push(rules_path);

    let errors_path = output_dir.join(ERRORS_FILE_NAME);
    write_validation_errors_json(bundle.errors, &errors_path)?;
    written.push(errors_path);

    Ok(written)
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
