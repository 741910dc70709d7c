//! Tests for schema and per-entity row checks.

use alchemist_model::{CellValue, Entity, Row, Table, ValidationError};
use alchemist_validate::{
    validate_clients, validate_structure, validate_table, validate_tasks, validate_workers,
};

fn client(id: &str, priority: CellValue, requested: &str, attributes: &str) -> Row {
    Row::from_pairs([
        ("ClientID", CellValue::from(id)),
        ("PriorityLevel", priority),
        ("RequestedTaskIDs", CellValue::from(requested)),
        ("GroupTag", CellValue::from("GA")),
        ("AttributesJSON", CellValue::from(attributes)),
    ])
}

fn worker(id: &str, slots: &str, max_load: &str) -> Row {
    Row::from_pairs([
        ("WorkerID", id),
        ("Skills", "[\"welding\"]"),
        ("AvailableSlots", slots),
        ("MaxLoadPerPhase", max_load),
    ])
}

fn task(id: &str, duration: &str, phases: &str, max_concurrent: &str) -> Row {
    Row::from_pairs([
        ("TaskID", id),
        ("Duration", duration),
        ("PreferredPhases", phases),
        ("RequiredSkills", "[]"),
        ("MaxConcurrent", max_concurrent),
    ])
}

fn on_field<'a>(errors: &'a [ValidationError], field: &str) -> Vec<&'a ValidationError> {
    errors.iter().filter(|error| error.field == field).collect()
}

// --- Schema checks ---

#[test]
fn schema_reports_each_missing_column() {
    let table = Table::from_rows(
        Entity::Clients,
        vec![Row::from_pairs([("ClientID", "C1"), ("PriorityLevel", "3")])],
    );
    let errors = validate_structure(&table);
    let fields: Vec<&str> = errors.iter().map(|error| error.field.as_str()).collect();
    assert_eq!(fields, vec!["RequestedTaskIDs", "GroupTag", "AttributesJSON"]);
    assert!(errors.iter().all(|error| error.row.is_none()));
    assert_eq!(errors[1].message, "GroupTag column is missing");
}

#[test]
fn schema_ignores_empty_tables() {
    let table = Table::new(Entity::Workers, vec!["WorkerID".to_string()]);
    assert!(validate_structure(&table).is_empty());
}

#[test]
fn schema_passes_complete_worker_header() {
    let table = Table::from_rows(Entity::Workers, vec![worker("W1", "[1]", "1")]);
    assert!(validate_structure(&table).is_empty());
}

// --- Clients ---

#[test]
fn priority_level_must_be_between_one_and_five() {
    let rows = vec![
        client("C1", CellValue::Number(1.0), "T1", "{}"),
        client("C2", CellValue::from("5"), "T1", "{}"),
        client("C3", CellValue::Number(0.0), "T1", "{}"),
        client("C4", CellValue::from("high"), "T1", "{}"),
        client("C5", CellValue::Number(6.0), "T1", "{}"),
        client("C6", CellValue::Missing, "T1", "{}"),
    ];
    let errors = validate_clients(&Table::from_rows(Entity::Clients, rows));
    let rows: Vec<Option<usize>> = on_field(&errors, "PriorityLevel")
        .iter()
        .map(|error| error.row)
        .collect();
    assert_eq!(rows, vec![Some(2), Some(3), Some(4), Some(5)]);
    assert_eq!(errors[0].message, "PriorityLevel must be between 1 and 5");
}

#[test]
fn duplicate_client_ids_flag_later_rows_only() {
    let rows = vec![
        client("C1", CellValue::Number(1.0), "T1", "{}"),
        client("C2", CellValue::Number(1.0), "T1", "{}"),
        client("C1", CellValue::Number(1.0), "T1", "{}"),
        client("C1", CellValue::Number(1.0), "T1", "{}"),
        client("  ", CellValue::Number(1.0), "T1", "{}"),
    ];
    let errors = validate_clients(&Table::from_rows(Entity::Clients, rows));
    let ids = on_field(&errors, "ClientID");
    assert_eq!(ids.len(), 3);
    assert_eq!((ids[0].row, ids[0].message.as_str()), (Some(2), "Duplicate ClientID"));
    assert_eq!((ids[1].row, ids[1].message.as_str()), (Some(3), "Duplicate ClientID"));
    assert_eq!((ids[2].row, ids[2].message.as_str()), (Some(4), "ClientID is required"));
}

#[test]
fn requested_task_ids_reject_blank_tokens() {
    let rows = vec![
        client("C1", CellValue::Number(1.0), "T1, T2", "{}"),
        client("C2", CellValue::Number(1.0), "T1,,T2", "{}"),
        client("C3", CellValue::Number(1.0), "", "{}"),
        client("C4", CellValue::Number(1.0), "T1,", "{}"),
    ];
    let errors = validate_clients(&Table::from_rows(Entity::Clients, rows));
    let rows: Vec<Option<usize>> = on_field(&errors, "RequestedTaskIDs")
        .iter()
        .map(|error| error.row)
        .collect();
    assert_eq!(rows, vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn attributes_json_must_parse() {
    let rows = vec![
        client("C1", CellValue::Number(1.0), "T1", "{\"x\":1}"),
        client("C2", CellValue::Number(1.0), "T1", "{bad"),
    ];
    let errors = validate_clients(&Table::from_rows(Entity::Clients, rows));
    let attributes = on_field(&errors, "AttributesJSON");
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].row, Some(1));
    assert_eq!(attributes[0].message, "Malformed JSON in AttributesJSON");
}

// --- Workers ---

#[test]
fn worker_slots_and_load_are_checked() {
    let rows = vec![
        worker("W1", "[1,2,3]", "2"),
        worker("W2", "[1,\"x\"]", "1"),
        worker("W3", "not a list", "0"),
        worker("W1", "[]", "abc"),
    ];
    let errors = validate_workers(&Table::from_rows(Entity::Workers, rows));
    let slots: Vec<Option<usize>> = on_field(&errors, "AvailableSlots")
        .iter()
        .map(|error| error.row)
        .collect();
    assert_eq!(slots, vec![Some(1), Some(2)]);
    let load: Vec<Option<usize>> = on_field(&errors, "MaxLoadPerPhase")
        .iter()
        .map(|error| error.row)
        .collect();
    assert_eq!(load, vec![Some(2), Some(3)]);
    assert_eq!(on_field(&errors, "WorkerID")[0].message, "Duplicate WorkerID");
}

// --- Tasks ---

#[test]
fn task_numbers_and_phases_are_checked() {
    let rows = vec![
        task("T1", "1", "1,2,4-6", "1"),
        task("T2", "0", "[2,3]", "3"),
        task("T3", "2", "early", "0"),
        task("T4", "2", "", "1"),
    ];
    let errors = validate_tasks(&Table::from_rows(Entity::Tasks, rows));
    assert_eq!(on_field(&errors, "Duration")[0].row, Some(1));
    assert_eq!(on_field(&errors, "MaxConcurrent")[0].row, Some(2));
    let phases = on_field(&errors, "PreferredPhases");
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].row, Some(2));
    assert_eq!(phases[0].message, "Invalid format in PreferredPhases");
    assert_eq!(errors.len(), 3);
}

#[test]
fn validate_table_combines_schema_and_rows() {
    let table = Table::from_rows(
        Entity::Tasks,
        vec![Row::from_pairs([("TaskID", "T1"), ("Duration", "0")])],
    );
    let errors = validate_table(&table);
    assert!(errors.iter().any(|error| error.message == "MaxConcurrent column is missing"));
    assert!(errors.iter().any(|error| error.message == "Duration must be ≥ 1"));
    assert!(errors.iter().all(|error| error.entity == Entity::Tasks));
}
