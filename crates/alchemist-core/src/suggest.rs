//! Heuristic rule suggestions.

use std::collections::HashMap;

use alchemist_model::records::split_list;
use alchemist_model::{Rule, Table};
use tracing::debug;

/// A task must be requested by more than this many clients to qualify.
const MIN_REQUEST_COUNT: usize = 2;
/// Maximum number of tasks grouped into one suggested rule.
const MAX_GROUP_SIZE: usize = 3;

/// Suggests a co-run group for the tasks clients request most often.
///
/// Tasks requested more than twice qualify, in first-seen order. With at
/// least two qualifying tasks one `coRun` rule over the first three is
/// suggested; otherwise nothing. Suggestions are unvalidated and must go
/// through the workbook like any other rule.
pub fn suggest_rules_from_clients(clients: &Table) -> Vec<Rule> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for row in &clients.rows {
        let Some(raw) = row.text("RequestedTaskIDs") else {
            continue;
        };
        for id in split_list(&raw).into_iter().filter(|id| !id.is_empty()) {
            let count = counts.entry(id.clone()).or_insert(0);
            if *count == 0 {
                order.push(id);
            }
            *count += 1;
        }
    }

    let frequent: Vec<String> = order
        .into_iter()
        .filter(|id| counts.get(id).is_some_and(|count| *count > MIN_REQUEST_COUNT))
        .collect();
    debug!(
        distinct_tasks = counts.len(),
        frequent_tasks = frequent.len(),
        "scanned client requests"
    );

    if frequent.len() < 2 {
        return Vec::new();
    }
    vec![Rule::co_run(frequent.into_iter().take(MAX_GROUP_SIZE))]
}
