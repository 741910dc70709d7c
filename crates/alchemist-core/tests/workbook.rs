//! Tests for the workbook session.

use alchemist_core::{Workbook, WorkbookError};
use alchemist_model::{Entity, Row, Rule, Table, WeightPreset};

fn clients(requested: &str) -> Table {
    Table::from_rows(
        Entity::Clients,
        vec![Row::from_pairs([
            ("ClientID", "C1"),
            ("PriorityLevel", "3"),
            ("RequestedTaskIDs", requested),
            ("GroupTag", "GA"),
            ("AttributesJSON", "{}"),
        ])],
    )
}

fn workers(skills: &str) -> Table {
    Table::from_rows(
        Entity::Workers,
        vec![Row::from_pairs([
            ("WorkerID", "W1"),
            ("Skills", skills),
            ("AvailableSlots", "[1,2]"),
            ("MaxLoadPerPhase", "2"),
        ])],
    )
}

fn tasks(ids: &[&str]) -> Table {
    Table::from_rows(
        Entity::Tasks,
        ids.iter()
            .map(|id| {
                Row::from_pairs([
                    ("TaskID", *id),
                    ("Duration", "1"),
                    ("PreferredPhases", "1-2"),
                    ("RequiredSkills", "[\"welding\"]"),
                    ("MaxConcurrent", "1"),
                ])
            })
            .collect(),
    )
}

fn messages(workbook: &Workbook, entity: Entity) -> Vec<String> {
    workbook
        .errors_for(entity)
        .map(|error| error.message.clone())
        .collect()
}

#[test]
fn upload_validates_only_that_entity_until_all_tables_exist() {
    let mut workbook = Workbook::new();
    workbook.load_table(clients("T1,T9")).unwrap();
    assert!(workbook.errors().is_empty());

    workbook.load_table(workers("[\"welding\"]")).unwrap();
    assert!(workbook.errors().is_empty());

    workbook.load_table(tasks(&["T1"])).unwrap();
    assert_eq!(messages(&workbook, Entity::Clients), vec!["Unknown task ID: T9"]);
}

#[test]
fn fixing_a_table_clears_stale_cross_reference_errors() {
    let mut workbook = Workbook::new();
    workbook.load_table(clients("T1,T9")).unwrap();
    workbook.load_table(workers("[\"soldering\"]")).unwrap();
    workbook.load_table(tasks(&["T1"])).unwrap();
    assert_eq!(messages(&workbook, Entity::Tasks), vec!["No worker has skill 'welding'"]);

    workbook.update_table(tasks(&["T1", "T9"])).unwrap();
    assert!(messages(&workbook, Entity::Clients).is_empty());

    workbook.update_table(workers("[\"welding\"]")).unwrap();
    assert!(workbook.errors().is_empty());
    assert!(!workbook.has_errors());
}

#[test]
fn edits_replace_previous_errors_for_the_entity() {
    let mut workbook = Workbook::new();
    let mut table = clients("T1");
    table.rows[0].insert("PriorityLevel", "9");
    workbook.load_table(table).unwrap();
    assert_eq!(
        messages(&workbook, Entity::Clients),
        vec!["PriorityLevel must be between 1 and 5"]
    );

    workbook.update_table(clients("T1")).unwrap();
    assert!(workbook.errors().is_empty());
}

#[test]
fn rejected_rule_is_not_added() {
    let mut workbook = Workbook::new();
    workbook.load_table(tasks(&["T1", "T2"])).unwrap();

    let err = workbook.add_rule(Rule::co_run(["T1", "T3"])).unwrap_err();
    assert_eq!(
        err.rejection_message(),
        Some("Invalid TaskIDs: T3 not found in uploaded tasks.")
    );
    assert!(workbook.rules().is_empty());

    workbook.add_rule(Rule::co_run(["T1", "T2"])).unwrap();
    assert_eq!(workbook.rules().len(), 1);
}

#[test]
fn cycle_is_reported_and_rule_kept() {
    let mut workbook = Workbook::new();
    workbook.load_table(tasks(&["A", "B", "C"])).unwrap();
    workbook.add_rule(Rule::co_run(["A", "B"])).unwrap();
    workbook.add_rule(Rule::co_run(["B", "C"])).unwrap();
    assert!(messages(&workbook, Entity::Rules).is_empty());

    workbook.add_rule(Rule::co_run(["C", "A"])).unwrap();
    assert_eq!(workbook.rules().len(), 3);
    assert_eq!(
        messages(&workbook, Entity::Rules),
        vec!["Circular co-run group involving A"]
    );
}

#[test]
fn padded_task_id_still_closes_cycle() {
    let mut workbook = Workbook::new();
    workbook.load_table(tasks(&["A", "B", "C"])).unwrap();
    workbook.add_rule(Rule::co_run(["A", "B"])).unwrap();
    workbook.add_rule(Rule::co_run(["B", "C"])).unwrap();
    workbook.add_rule(Rule::co_run(["C", " A"])).unwrap();
    assert_eq!(
        messages(&workbook, Entity::Rules),
        vec!["Circular co-run group involving A"]
    );
}

#[test]
fn bulk_import_collects_rejections() {
    let mut workbook = Workbook::new();
    workbook.load_table(tasks(&["T1", "T2"])).unwrap();
    let rejected = workbook.add_rules([
        Rule::co_run(["T1", "T2"]),
        Rule::co_run(["T1", "T1"]),
    ]);
    assert_eq!(rejected.len(), 1);
    assert!(matches!(rejected[0], WorkbookError::RuleRejected { .. }));
    assert_eq!(workbook.rules().len(), 1);
}

#[test]
fn rules_table_cannot_be_loaded() {
    let mut workbook = Workbook::new();
    let result = workbook.load_table(Table::new(Entity::Rules, vec![]));
    assert!(matches!(result, Err(WorkbookError::NotATable { .. })));
}

#[test]
fn builder_sets_weights_and_validates_datasets() {
    let mut datasets = alchemist_model::Datasets::new();
    datasets.replace(Table::from_rows(
        Entity::Workers,
        vec![Row::from_pairs([("WorkerID", "W1")])],
    ));
    let workbook = Workbook::new()
        .with_weights(WeightPreset::MinimizeWorkload.weights())
        .with_datasets(datasets);

    assert_eq!(workbook.weights().load, 10);
    assert!(
        messages(&workbook, Entity::Workers)
            .iter()
            .any(|message| message == "Skills column is missing")
    );
}
