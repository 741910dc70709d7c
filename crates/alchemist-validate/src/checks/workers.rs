//! Worker row checks.

use alchemist_model::{Entity, Field, ValidationError, WorkerRecord};

use crate::util::{UniqueIds, at_least};

/// Check worker identifiers, slot lists and per-phase load.
pub fn check(records: &[WorkerRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut ids = UniqueIds::new(Entity::Workers, "WorkerID");

    for (row, record) in records.iter().enumerate() {
        ids.check(row, &record.worker_id, &mut errors);

        if !matches!(record.available_slots, Field::Value(_)) {
            errors.push(ValidationError::error(
                Entity::Workers,
                row,
                "AvailableSlots",
                "Malformed list in AvailableSlots",
            ));
        }

        if !at_least(&record.max_load_per_phase, 1.0) {
            errors.push(ValidationError::error(
                Entity::Workers,
                row,
                "MaxLoadPerPhase",
                "MaxLoadPerPhase must be ≥ 1",
            ));
        }
    }

    errors
}
