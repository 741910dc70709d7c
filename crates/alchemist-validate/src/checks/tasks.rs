//! Task row checks.

use std::sync::LazyLock;

use alchemist_model::{Entity, TaskRecord, ValidationError};
use regex::Regex;

use crate::util::{UniqueIds, at_least};

/// Either a JSON-style array literal or a comma list of phases and ranges
/// such as `1,2,4-6`.
static PREFERRED_PHASES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[.*\]$|^([0-9]+(-[0-9]+)?)(,[0-9]+(-[0-9]+)?)*$")
        .expect("Invalid PreferredPhases regex")
});

/// Check task identifiers, duration, concurrency and preferred phases.
pub fn check(records: &[TaskRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut ids = UniqueIds::new(Entity::Tasks, "TaskID");

    for (row, record) in records.iter().enumerate() {
        ids.check(row, &record.task_id, &mut errors);

        if !at_least(&record.duration, 1.0) {
            errors.push(ValidationError::error(
                Entity::Tasks,
                row,
                "Duration",
                "Duration must be ≥ 1",
            ));
        }

        if !at_least(&record.max_concurrent, 1.0) {
            errors.push(ValidationError::error(
                Entity::Tasks,
                row,
                "MaxConcurrent",
                "MaxConcurrent must be ≥ 1",
            ));
        }

        // Blank or non-text phases are not checked.
        if let Some(phases) = &record.preferred_phases
            && !is_phase_spec(phases)
        {
            errors.push(ValidationError::error(
                Entity::Tasks,
                row,
                "PreferredPhases",
                "Invalid format in PreferredPhases",
            ));
        }
    }

    errors
}

/// Whether a `PreferredPhases` value has an accepted shape.
pub fn is_phase_spec(value: &str) -> bool {
    PREFERRED_PHASES_REGEX.is_match(value)
}
