//! Rules and validation error export.

use std::path::Path;

use alchemist_model::{PrioritizationWeights, Rule, RulesDocument, ValidationError};

use crate::error::Result;
use crate::write_file;

/// Pretty JSON array of `rules` followed by the weights entry.
pub fn rules_json(rules: &[Rule], weights: PrioritizationWeights) -> Result<String> {
    let document = RulesDocument::new(rules.to_vec(), Some(weights));
    Ok(serde_json::to_string_pretty(&document.to_json_value()?)?)
}

/// Writes `rules.json` content to `path`.
pub fn write_rules_json(rules: &[Rule], weights: PrioritizationWeights, path: &Path) -> Result<()> {
    let json = rules_json(rules, weights)?;
    write_file(path, format!("{json}\n").as_bytes())?;
    tracing::info!(rules = rules.len(), path = %path.display(), "wrote rules");
    Ok(())
}

/// Writes the aggregated error list as a pretty JSON array.
pub fn write_validation_errors_json(errors: &[ValidationError], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(errors)?;
    write_file(path, format!("{json}\n").as_bytes())?;
    tracing::info!(errors = errors.len(), path = %path.display(), "wrote validation errors");
    Ok(())
}
