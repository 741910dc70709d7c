//! Loading command inputs into a [`Workbook`].
//!
//! Commands share these helpers so that every path through the CLI validates
//! tables and rules the same way the workbook does.

use std::path::{Path, PathBuf};

use alchemist_core::{FilterCondition, Workbook, WorkbookError, apply_filters, parse_query};
use alchemist_ingest::{load_datasets, read_csv_table, read_entity_file};
use alchemist_model::{Datasets, Entity, PrioritizationWeights, RulesDocument, Table, WeightPreset};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// A workbook built from command inputs, with the rules the shape check
/// refused.
#[derive(Debug)]
pub struct Session {
    pub workbook: Workbook,
    pub rejected: Vec<WorkbookError>,
}

impl Session {
    /// Whether the run produced error-kind entries or rejected rules.
    pub fn has_errors(&self) -> bool {
        self.workbook.has_errors() || !self.rejected.is_empty()
    }
}

/// Loads folders and individual CSV files. Later inputs replace earlier
/// tables of the same entity.
pub fn load_inputs(inputs: &[PathBuf]) -> Result<Datasets> {
    let mut datasets = Datasets::new();
    for input in inputs {
        if input.is_dir() {
            let loaded = load_datasets(input)
                .with_context(|| format!("load data folder {}", input.display()))?;
            for table in [loaded.clients, loaded.workers, loaded.tasks]
                .into_iter()
                .flatten()
            {
                replace_table(&mut datasets, table);
            }
        } else {
            let table = read_entity_file(input)
                .with_context(|| format!("load data file {}", input.display()))?;
            replace_table(&mut datasets, table);
        }
    }
    Ok(datasets)
}

fn replace_table(datasets: &mut Datasets, table: Table) {
    let entity = table.entity;
    if datasets.replace(table).is_some() {
        warn!(entity = %entity, "table replaced by a later input");
    }
}

/// Reads a rules file.
pub fn read_rules_file(path: &Path) -> Result<RulesDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read rules file {}", path.display()))?;
    RulesDocument::from_json(&text).with_context(|| format!("parse rules file {}", path.display()))
}

/// Validates the inputs and, when given, adds the rules of a rules file.
///
/// Weights from the rules file become the workbook weights.
pub fn open_session(inputs: &[PathBuf], rules: Option<&Path>) -> Result<Session> {
    let datasets = load_inputs(inputs)?;
    let mut workbook = Workbook::new().with_datasets(datasets);
    let mut rejected = Vec::new();
    if let Some(path) = rules {
        let document = read_rules_file(path)?;
        if let Some(weights) = document.weights {
            workbook.set_weights(weights);
        }
        rejected = workbook.add_rules(document.rules);
    }
    info!(
        tables = workbook.datasets().loaded().len(),
        rules = workbook.rules().len(),
        errors = workbook.errors().len(),
        rejected = rejected.len(),
        "session opened"
    );
    Ok(Session { workbook, rejected })
}

/// Weight selection from command-line flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightOverrides {
    pub preset: Option<WeightPreset>,
    pub priority: Option<u8>,
    pub fairness: Option<u8>,
    pub load: Option<u8>,
}

impl WeightOverrides {
    /// A preset replaces `base`; individual weights then override it.
    pub fn apply(&self, base: PrioritizationWeights) -> Result<PrioritizationWeights> {
        let mut weights = self.preset.map_or(base, |preset| preset.weights());
        if let Some(value) = self.priority {
            weights = weights.with_priority(value);
        }
        if let Some(value) = self.fairness {
            weights = weights.with_fairness(value);
        }
        if let Some(value) = self.load {
            weights = weights.with_load(value);
        }
        weights.validate().context("invalid weights")?;
        Ok(weights)
    }
}

/// A table with the rows a query selected.
#[derive(Debug)]
pub struct FilterOutcome {
    pub table: Table,
    pub conditions: Vec<FilterCondition>,
    pub matches: Vec<usize>,
}

/// Reads one CSV file and applies a filter query to it. Query fields are
/// resolved against the entity's schema.
pub fn filter_file(path: &Path, query: &str, entity: Option<Entity>) -> Result<FilterOutcome> {
    let table = match entity {
        Some(entity) => read_csv_table(path, entity),
        None => read_entity_file(path),
    }
    .with_context(|| format!("load data file {}", path.display()))?;
    let conditions: Vec<FilterCondition> = parse_query(query)
        .into_iter()
        .map(|condition| condition.resolved(table.entity))
        .collect();
    let matches = apply_filters(&table, &conditions);
    info!(
        entity = %table.entity,
        conditions = conditions.len(),
        matches = matches.len(),
        "filter applied"
    );
    Ok(FilterOutcome {
        table,
        conditions,
        matches,
    })
}
