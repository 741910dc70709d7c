//! Client row checks.

use alchemist_model::{ClientRecord, Entity, Field, ValidationError};

use crate::util::UniqueIds;

const PRIORITY_RANGE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

/// Check client identifiers, priority, requested tasks and attributes.
pub fn check(records: &[ClientRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut ids = UniqueIds::new(Entity::Clients, "ClientID");

    for (row, record) in records.iter().enumerate() {
        ids.check(row, &record.client_id, &mut errors);

        if !matches!(record.priority_level, Field::Value(level) if PRIORITY_RANGE.contains(&level)) {
            errors.push(ValidationError::error(
                Entity::Clients,
                row,
                "PriorityLevel",
                "PriorityLevel must be between 1 and 5",
            ));
        }

        if !has_requested_tasks(&record.requested_task_ids) {
            errors.push(ValidationError::error(
                Entity::Clients,
                row,
                "RequestedTaskIDs",
                "Missing or invalid RequestedTaskIDs",
            ));
        }

        if !is_json(&record.attributes_json) {
            errors.push(ValidationError::error(
                Entity::Clients,
                row,
                "AttributesJSON",
                "Malformed JSON in AttributesJSON",
            ));
        }
    }

    errors
}

fn has_requested_tasks(ids: &Field<Vec<String>>) -> bool {
    match ids {
        Field::Value(tokens) => !tokens.is_empty() && tokens.iter().all(|token| !token.is_empty()),
        Field::Missing | Field::Invalid(_) => false,
    }
}

fn is_json(raw: &Field<String>) -> bool {
    match raw {
        Field::Value(text) => serde_json::from_str::<serde_json::Value>(text).is_ok(),
        Field::Missing | Field::Invalid(_) => false,
    }
}
