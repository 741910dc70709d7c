//! Tests for CSV loading and entity discovery.

use std::fs;

use alchemist_ingest::{
    IngestError, detect_entity, discover_entity_files, load_datasets, read_entity_file,
    resolve_header, resolve_headers,
};
use alchemist_model::Entity;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write csv");
    path
}

#[test]
fn header_variants_resolve_to_canonical_names() {
    for raw in ["client id", "Client_ID", "clientid", " CLIENTID "] {
        assert_eq!(resolve_header(raw, Entity::Clients), "ClientID");
    }
    assert_eq!(resolve_header("Max Load Per Phase", Entity::Workers), "MaxLoadPerPhase");
    assert_eq!(resolve_header("Slots", Entity::Workers), "AvailableSlots");
    assert_eq!(resolve_header("Notes", Entity::Tasks), "Notes");
}

#[test]
fn partial_header_cannot_take_claimed_field() {
    assert_eq!(
        resolve_headers(["TaskID", "Task", "Duration"], Entity::Tasks),
        vec!["TaskID", "TaskName", "Duration"]
    );
    assert_eq!(
        resolve_headers(["Task", "TaskID"], Entity::Tasks),
        vec!["TaskName", "TaskID"]
    );
    assert_eq!(
        resolve_headers(["Slots", "Available Slots", "WorkerID"], Entity::Workers),
        vec!["Slots", "AvailableSlots", "WorkerID"]
    );
}

#[test]
fn task_column_does_not_overwrite_task_id() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "tasks.csv", "TaskID,Task,Duration\nT1,Welding job,2\n");
    let table = read_entity_file(&path).expect("tasks table");
    assert_eq!(table.rows[0].text("TaskID").as_deref(), Some("T1"));
    assert_eq!(table.rows[0].text("TaskName").as_deref(), Some("Welding job"));
}

#[test]
fn detect_entity_by_name() {
    assert_eq!(detect_entity("client_data.csv"), Some(Entity::Clients));
    assert_eq!(detect_entity("Workers.csv"), Some(Entity::Workers));
    assert_eq!(detect_entity("all-tasks.csv"), Some(Entity::Tasks));
    assert_eq!(detect_entity("summary.csv"), None);
}

#[test]
fn discovery_skips_unrecognised_files() {
    let dir = TempDir::new().expect("tempdir");
    write(&dir, "tasks.csv", "TaskID\nT1\n");
    write(&dir, "clients.csv", "ClientID\nC1\n");
    write(&dir, "readme.csv", "Text\nhello\n");
    write(&dir, "workers.txt", "WorkerID\nW1\n");

    let files = discover_entity_files(dir.path()).expect("discover");
    let entities: Vec<Entity> = files.iter().map(|file| file.entity).collect();
    assert_eq!(entities, vec![Entity::Clients, Entity::Tasks]);
}

#[test]
fn load_datasets_reads_all_entities() {
    let dir = TempDir::new().expect("tempdir");
    write(
        &dir,
        "clients.csv",
        "ClientID,PriorityLevel,RequestedTaskIDs,GroupTag,AttributesJSON\nC1,3,\"T1,T2\",GA,\"{\"\"x\"\":1}\"\n",
    );
    write(
        &dir,
        "workers.csv",
        "WorkerID,Skills,AvailableSlots,MaxLoadPerPhase\nW1,\"[\"\"welding\"\"]\",\"[1,2]\",2\n",
    );
    write(
        &dir,
        "tasks.csv",
        "TaskID,Duration,PreferredPhases,RequiredSkills,MaxConcurrent\nT1,1,1-2,\"[\"\"welding\"\"]\",1\n",
    );

    let datasets = load_datasets(dir.path()).expect("load");
    let complete = datasets.complete().expect("all three tables");
    assert_eq!(complete.clients.len(), 1);
    assert_eq!(
        complete.clients.rows[0].text("AttributesJSON").as_deref(),
        Some("{\"x\":1}")
    );
    assert_eq!(
        complete.workers.rows[0].text("Skills").as_deref(),
        Some("[\"welding\"]")
    );
    assert_eq!(complete.tasks.columns.len(), 5);
}

#[test]
fn read_entity_file_requires_recognisable_name() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(&dir, "data.csv", "TaskID\nT1\n");
    assert!(matches!(
        read_entity_file(&path),
        Err(IngestError::UnknownEntity { .. })
    ));

    let path = write(&dir, "Tasks-2024.csv", "TaskID\nT1\n");
    let table = read_entity_file(&path).expect("tasks table");
    assert_eq!(table.entity, Entity::Tasks);
}

#[test]
fn missing_directory_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let result = load_datasets(&dir.path().join("nope"));
    assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
}
