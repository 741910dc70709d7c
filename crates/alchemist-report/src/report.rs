//! Validation summary payload.

use std::path::Path;

use alchemist_model::{Datasets, Entity, IssueKind, Rule, ValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::write_file;

const REPORT_SCHEMA: &str = "data-alchemist.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub rule_count: usize,
    pub entities: Vec<EntitySummary>,
    pub issues: Vec<ValidationError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub entity: Entity,
    /// `None` for entities without a loaded table.
    pub rows: Option<usize>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl ValidationReport {
    /// Builds a report stamped with the current time.
    pub fn new(datasets: &Datasets, rules: &[Rule], errors: &[ValidationError]) -> Self {
        Self::generated_at(datasets, rules, errors, Utc::now())
    }

    /// Builds a report with an explicit timestamp.
    pub fn generated_at(
        datasets: &Datasets,
        rules: &[Rule],
        errors: &[ValidationError],
        timestamp: DateTime<Utc>,
    ) -> Self {
        let entities = Entity::TABLES
            .into_iter()
            .chain([Entity::Rules])
            .map(|entity| EntitySummary {
                entity,
                rows: datasets.get(entity).map(alchemist_model::Table::len),
                error_count: count(errors, entity, IssueKind::Error),
                warning_count: count(errors, entity, IssueKind::Warning),
            })
            .collect();

        Self {
            schema: REPORT_SCHEMA,
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: timestamp.to_rfc3339(),
            rule_count: rules.len(),
            entities,
            issues: errors.to_vec(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.entities.iter().map(|summary| summary.error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.entities.iter().map(|summary| summary.warning_count).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

fn count(errors: &[ValidationError], entity: Entity, kind: IssueKind) -> usize {
    errors
        .iter()
        .filter(|error| error.entity == entity && error.kind == kind)
        .count()
}

/// Writes the report as pretty JSON.
pub fn write_validation_report(report: &ValidationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    write_file(path, format!("{json}\n").as_bytes())?;
    tracing::info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        path = %path.display(),
        "wrote validation report"
    );
    Ok(())
}
