//! Validation and rule-consistency checks.
//!
//! Every check is a pure function returning [`ValidationError`] records;
//! malformed input is reported, never raised.

pub mod checks;
pub mod cross_reference;
pub mod merge;
pub mod rules;
pub mod schema;
mod util;

use alchemist_model::{Entity, Table, ValidationError};
use tracing::debug;

pub use cross_reference::{
    CrossReferenceInput, CrossReferenceResult, validate_cross_references, validate_datasets,
};
pub use merge::merge_errors;
pub use rules::{find_co_run_cycle, validate_rule, validate_rules};
pub use schema::validate_structure;

/// Schema check followed by the entity's row checks.
pub fn validate_table(table: &Table) -> Vec<ValidationError> {
    let mut errors = validate_structure(table);
    let schema_errors = errors.len();
    errors.extend(checks::run_all(table));
    debug!(
        entity = %table.entity,
        rows = table.len(),
        schema_errors,
        row_errors = errors.len() - schema_errors,
        "table validated"
    );
    errors
}

/// Row checks for a client table.
pub fn validate_clients(table: &Table) -> Vec<ValidationError> {
    checks::check_rows(Entity::Clients, &table.rows)
}

/// Row checks for a worker table.
pub fn validate_workers(table: &Table) -> Vec<ValidationError> {
    checks::check_rows(Entity::Workers, &table.rows)
}

/// Row checks for a task table.
pub fn validate_tasks(table: &Table) -> Vec<ValidationError> {
    checks::check_rows(Entity::Tasks, &table.rows)
}
