//! Workbook session: datasets, rules and the aggregated error list.
//!
//! Every upload, edit and rule addition re-runs the affected validators and
//! replaces the errors of the affected entity through
//! [`merge_errors`]. Cross-reference checks run once clients, workers and
//! tasks are all loaded; from then on every table change recomputes the
//! errors of every loaded table so no stale cross-reference error survives.

use alchemist_model::{Datasets, Entity, PrioritizationWeights, Rule, Table, ValidationError};
use alchemist_validate::{
    CrossReferenceResult, merge_errors, validate_datasets, validate_rule, validate_rules,
    validate_table,
};
use tracing::{debug, info};

use crate::error::{Result, WorkbookError};

/// Owned validation session.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    datasets: Datasets,
    rules: Vec<Rule>,
    errors: Vec<ValidationError>,
    weights: PrioritizationWeights,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from already loaded datasets and validates all of them.
    pub fn with_datasets(mut self, datasets: Datasets) -> Self {
        self.datasets = datasets;
        self.revalidate_tables();
        self
    }

    /// Sets the prioritization weights.
    pub fn with_weights(mut self, weights: PrioritizationWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Uploads a table, replacing any previous table of the same entity.
    pub fn load_table(&mut self, table: Table) -> Result<()> {
        let entity = table.entity;
        if !entity.is_table() {
            return Err(WorkbookError::NotATable { entity });
        }
        info!(entity = %entity, rows = table.len(), "table loaded");
        self.datasets.replace(table);
        self.refresh_after_change(entity);
        Ok(())
    }

    /// Replaces a table after an edit. Validation is identical to an upload.
    pub fn update_table(&mut self, table: Table) -> Result<()> {
        let entity = table.entity;
        if !entity.is_table() {
            return Err(WorkbookError::NotATable { entity });
        }
        info!(entity = %entity, rows = table.len(), "table edited");
        self.datasets.replace(table);
        self.refresh_after_change(entity);
        Ok(())
    }

    /// Adds one rule after checking its shape against the loaded tasks.
    ///
    /// Accepted rules are kept even when they close a co-run cycle; the cycle
    /// is reported in the `rules` errors.
    pub fn add_rule(&mut self, rule: Rule) -> Result<()> {
        if let Some(message) = validate_rule(&rule, &self.datasets) {
            info!(rule = %rule, %message, "rule rejected");
            return Err(WorkbookError::RuleRejected {
                rule: Box::new(rule),
                message,
            });
        }
        info!(rule = %rule, "rule added");
        self.rules.push(rule);
        self.refresh_rules();
        Ok(())
    }

    /// Adds several rules; returns the rejections. Accepted rules are kept.
    pub fn add_rules<I>(&mut self, rules: I) -> Vec<WorkbookError>
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut rejected = Vec::new();
        let mut added = 0usize;
        for rule in rules {
            match validate_rule(&rule, &self.datasets) {
                Some(message) => rejected.push(WorkbookError::RuleRejected {
                    rule: Box::new(rule),
                    message,
                }),
                None => {
                    self.rules.push(rule);
                    added += 1;
                }
            }
        }
        info!(added, rejected = rejected.len(), "rules imported");
        self.refresh_rules();
        rejected
    }

    pub fn set_weights(&mut self, weights: PrioritizationWeights) {
        self.weights = weights;
    }

    pub fn weights(&self) -> PrioritizationWeights {
        self.weights
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The aggregated error list.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn errors_for(&self, entity: Entity) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |error| error.entity == entity)
    }

    /// Whether any error-kind entry exists.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(ValidationError::is_error)
    }

    /// Recomputes every loaded table's errors from scratch.
    pub fn revalidate_tables(&mut self) {
        let cross = self.cross_reference();
        for entity in self.datasets.loaded() {
            self.refresh_entity(entity, cross.as_ref());
        }
    }

    fn refresh_after_change(&mut self, changed: Entity) {
        match self.cross_reference() {
            Some(cross) => {
                for entity in self.datasets.loaded() {
                    self.refresh_entity(entity, Some(&cross));
                }
            }
            None => self.refresh_entity(changed, None),
        }
    }

    fn cross_reference(&self) -> Option<CrossReferenceResult> {
        self.datasets.complete().map(validate_datasets)
    }

    fn refresh_entity(&mut self, entity: Entity, cross: Option<&CrossReferenceResult>) {
        let Some(table) = self.datasets.get(entity) else {
            return;
        };
        let mut fresh = validate_table(table);
        if let Some(cross) = cross {
            fresh.extend(cross.errors_for(entity).cloned());
        }
        debug!(entity = %entity, error_count = fresh.len(), "entity errors refreshed");
        self.errors = merge_errors(&self.errors, entity, fresh);
    }

    fn refresh_rules(&mut self) {
        let fresh = validate_rules(&self.rules);
        debug!(
            rule_count = self.rules.len(),
            error_count = fresh.len(),
            "rule errors refreshed"
        );
        self.errors = merge_errors(&self.errors, Entity::Rules, fresh);
    }
}
