//! Per-entity row checks.
//!
//! Each module consumes the typed records of one entity and returns a flat
//! list of field-scoped errors. Row order defines the row index.

pub mod clients;
pub mod tasks;
pub mod workers;

use alchemist_model::{ClientRecord, Entity, Row, Table, TaskRecord, ValidationError, WorkerRecord};

/// Runs the row checks matching the table's entity.
pub fn run_all(table: &Table) -> Vec<ValidationError> {
    check_rows(table.entity, &table.rows)
}

/// Coerces rows into the entity's records and checks them.
pub fn check_rows(entity: Entity, rows: &[Row]) -> Vec<ValidationError> {
    match entity {
        Entity::Clients => {
            let records: Vec<ClientRecord> = rows.iter().map(ClientRecord::from_row).collect();
            clients::check(&records)
        }
        Entity::Workers => {
            let records: Vec<WorkerRecord> = rows.iter().map(WorkerRecord::from_row).collect();
            workers::check(&records)
        }
        Entity::Tasks => {
            let records: Vec<TaskRecord> = rows.iter().map(TaskRecord::from_row).collect();
            tasks::check(&records)
        }
        Entity::Rules => Vec::new(),
    }
}
