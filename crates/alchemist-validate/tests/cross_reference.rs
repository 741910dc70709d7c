//! Tests for cross-reference validation.

use alchemist_model::{Datasets, Entity, Row, Table};
use alchemist_validate::validate_datasets;

fn datasets(clients: Vec<Row>, workers: Vec<Row>, tasks: Vec<Row>) -> Datasets {
    let mut datasets = Datasets::new();
    datasets.replace(Table::from_rows(Entity::Clients, clients));
    datasets.replace(Table::from_rows(Entity::Workers, workers));
    datasets.replace(Table::from_rows(Entity::Tasks, tasks));
    datasets
}

#[test]
fn unknown_task_reference_is_reported_once() {
    let datasets = datasets(
        vec![
            Row::from_pairs([("ClientID", "C1"), ("RequestedTaskIDs", "T1")]),
            Row::from_pairs([("ClientID", "C2"), ("RequestedTaskIDs", "T1, T9")]),
        ],
        vec![],
        vec![Row::from_pairs([("TaskID", "T1")])],
    );
    let result = validate_datasets(datasets.complete().expect("complete"));

    assert_eq!(result.unknown_task_refs, 1);
    assert_eq!(result.total_issues(), 1);
    let error = &result.errors[0];
    assert_eq!(error.entity, Entity::Clients);
    assert_eq!(error.row, Some(1));
    assert_eq!(error.field, "RequestedTaskIDs");
    assert_eq!(error.message, "Unknown task ID: T9");
}

#[test]
fn repeated_unknown_id_in_one_row_is_reported_once() {
    let datasets = datasets(
        vec![Row::from_pairs([("ClientID", "C1"), ("RequestedTaskIDs", "T9,T9, ,T8")])],
        vec![],
        vec![Row::from_pairs([("TaskID", "T1")])],
    );
    let result = validate_datasets(datasets.complete().expect("complete"));
    let messages: Vec<&str> = result.errors.iter().map(|error| error.message.as_str()).collect();
    assert_eq!(messages, vec!["Unknown task ID: T9", "Unknown task ID: T8"]);
}

#[test]
fn uncovered_skill_is_reported_on_task_row() {
    let datasets = datasets(
        vec![],
        vec![Row::from_pairs([("WorkerID", "W1"), ("Skills", "[\"soldering\"]")])],
        vec![Row::from_pairs([("TaskID", "T1"), ("RequiredSkills", "[\"welding\"]")])],
    );
    let result = validate_datasets(datasets.complete().expect("complete"));

    assert_eq!(result.uncovered_skills, 1);
    let errors: Vec<_> = result.errors_for(Entity::Tasks).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, Some(0));
    assert_eq!(errors[0].field, "RequiredSkills");
    assert_eq!(errors[0].message, "No worker has skill 'welding'");
}

#[test]
fn malformed_skill_lists_count_as_empty() {
    let datasets = datasets(
        vec![],
        vec![
            Row::from_pairs([("WorkerID", "W1"), ("Skills", "welding")]),
            Row::from_pairs([("WorkerID", "W2"), ("Skills", "[\"cutting\"]")]),
        ],
        vec![
            Row::from_pairs([("TaskID", "T1"), ("RequiredSkills", "[\"cutting\"]")]),
            Row::from_pairs([("TaskID", "T2"), ("RequiredSkills", "{oops")]),
        ],
    );
    let result = validate_datasets(datasets.complete().expect("complete"));
    assert!(!result.has_issues());
}
