//! Referential integrity across the three tables.
//!
//! Runs only once clients, workers and tasks are all loaded:
//!
//! - **Task references**: every ID in a client's `RequestedTaskIDs` must
//!   exist in the task table.
//! - **Skill coverage**: every skill in a task's `RequiredSkills` must be
//!   held by at least one worker.

use std::collections::HashSet;

use alchemist_model::{
    ClientRecord, CompleteDatasets, Entity, Field, TaskRecord, ValidationError, WorkerRecord,
};
use tracing::debug;

use crate::util::distinct;

/// Input for cross-reference validation.
#[derive(Debug, Clone, Copy)]
pub struct CrossReferenceInput<'a> {
    pub clients: &'a [ClientRecord],
    pub workers: &'a [WorkerRecord],
    pub tasks: &'a [TaskRecord],
}

/// Result of cross-reference validation.
#[derive(Debug, Default)]
pub struct CrossReferenceResult {
    /// Client errors first, then task errors, each in row order.
    pub errors: Vec<ValidationError>,
    pub unknown_task_refs: u64,
    pub uncovered_skills: u64,
}

impl CrossReferenceResult {
    /// Check if any violations were found.
    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Total issue count.
    pub fn total_issues(&self) -> usize {
        self.errors.len()
    }

    /// Errors reported against one entity.
    pub fn errors_for(&self, entity: Entity) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |error| error.entity == entity)
    }
}

/// Run all cross-reference checks over typed records.
pub fn validate_cross_references(input: CrossReferenceInput<'_>) -> CrossReferenceResult {
    let mut result = CrossReferenceResult::default();

    let task_ids: HashSet<&str> = input
        .tasks
        .iter()
        .filter_map(|task| task.task_id.value().map(String::as_str))
        .collect();

    for (row, client) in input.clients.iter().enumerate() {
        let Field::Value(requested) = &client.requested_task_ids else {
            continue;
        };
        let tokens = requested.iter().map(String::as_str).filter(|id| !id.is_empty());
        for id in distinct(tokens) {
            if !task_ids.contains(id) {
                result.unknown_task_refs += 1;
                result.errors.push(ValidationError::error(
                    Entity::Clients,
                    row,
                    "RequestedTaskIDs",
                    format!("Unknown task ID: {id}"),
                ));
            }
        }
    }

    let skills: HashSet<&str> = input
        .workers
        .iter()
        .filter_map(|worker| worker.skills.value())
        .flatten()
        .map(String::as_str)
        .collect();

    for (row, task) in input.tasks.iter().enumerate() {
        let Field::Value(required) = &task.required_skills else {
            continue;
        };
        for skill in distinct(required.iter().map(String::as_str)) {
            if !skills.contains(skill) {
                result.uncovered_skills += 1;
                result.errors.push(ValidationError::error(
                    Entity::Tasks,
                    row,
                    "RequiredSkills",
                    format!("No worker has skill '{skill}'"),
                ));
            }
        }
    }

    debug!(
        unknown_task_refs = result.unknown_task_refs,
        uncovered_skills = result.uncovered_skills,
        "cross-reference validation finished"
    );
    result
}

/// Coerces a complete dataset triple and cross-validates it.
pub fn validate_datasets(datasets: CompleteDatasets<'_>) -> CrossReferenceResult {
    let clients: Vec<ClientRecord> = datasets.clients.rows.iter().map(ClientRecord::from_row).collect();
    let workers: Vec<WorkerRecord> = datasets.workers.rows.iter().map(WorkerRecord::from_row).collect();
    let tasks: Vec<TaskRecord> = datasets.tasks.rows.iter().map(TaskRecord::from_row).collect();
    validate_cross_references(CrossReferenceInput {
        clients: &clients,
        workers: &workers,
        tasks: &tasks,
    })
}
