//! Checks a single rule against the loaded tasks.

use std::collections::{HashMap, HashSet};

use alchemist_model::{Datasets, Rule, TaskRecord};

use crate::util::distinct;

/// Returns a rejection message for a malformed rule, or `None` when the rule
/// can be accepted.
///
/// For `coRun`, task IDs missing from the task table take precedence over
/// IDs repeated within the rule. Other rule types are accepted as-is.
pub fn validate_rule(rule: &Rule, datasets: &Datasets) -> Option<String> {
    match rule {
        Rule::CoRun(config) => check_co_run(&config.tasks, datasets),
        Rule::SlotRestriction(_) | Rule::LoadLimit(_) | Rule::PhaseWindow(_) => None,
    }
}

fn check_co_run(tasks: &[String], datasets: &Datasets) -> Option<String> {
    let records: Vec<TaskRecord> = datasets
        .tasks
        .as_ref()
        .map(|table| table.rows.iter().map(TaskRecord::from_row).collect())
        .unwrap_or_default();
    let known: HashSet<&str> = records
        .iter()
        .filter_map(|task| task.task_id.value().map(String::as_str))
        .collect();

    let missing = distinct(
        tasks
            .iter()
            .map(|id| id.trim())
            .filter(|id| !known.contains(id)),
    );
    if !missing.is_empty() {
        return Some(format!(
            "Invalid TaskIDs: {} not found in uploaded tasks.",
            missing.join(", ")
        ));
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in tasks {
        *counts.entry(id.trim()).or_default() += 1;
    }
    let duplicates = distinct(
        tasks
            .iter()
            .map(|id| id.trim())
            .filter(|id| counts.get(id).is_some_and(|count| *count > 1)),
    );
    if !duplicates.is_empty() {
        return Some(format!("Duplicate TaskIDs: {}", duplicates.join(", ")));
    }

    None
}
