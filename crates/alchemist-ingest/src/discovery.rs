//! File discovery for data folders.

use std::path::{Path, PathBuf};

use alchemist_model::{Datasets, Entity};
use tracing::warn;

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};

/// A CSV file whose name identifies its entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub entity: Entity,
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        // Check for .csv extension (case-insensitive)
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Detects the entity a file holds from its name.
///
/// The lower-cased name is checked for `client`, `worker` and `task`, in
/// that order.
pub fn detect_entity(file_name: &str) -> Option<Entity> {
    let lower = file_name.to_lowercase();
    if lower.contains("client") {
        Some(Entity::Clients)
    } else if lower.contains("worker") {
        Some(Entity::Workers)
    } else if lower.contains("task") {
        Some(Entity::Tasks)
    } else {
        None
    }
}

/// Lists the CSV files in `dir` whose names identify an entity.
///
/// Other CSV files are skipped with a warning.
pub fn discover_entity_files(dir: &Path) -> Result<Vec<DiscoveredFile>> {
    let mut discovered = Vec::new();
    for path in list_csv_files(dir)? {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        match detect_entity(name) {
            Some(entity) => discovered.push(DiscoveredFile { path, entity }),
            None => warn!(path = %path.display(), "skipping CSV file with no entity in its name"),
        }
    }
    Ok(discovered)
}

/// Reads one file, detecting its entity from the file name.
pub fn read_entity_file(path: &Path) -> Result<alchemist_model::Table> {
    let entity = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(detect_entity)
        .ok_or_else(|| IngestError::UnknownEntity {
            path: path.to_path_buf(),
        })?;
    read_csv_table(path, entity)
}

/// Loads every entity file found in `dir`.
///
/// When several files name the same entity the last one by file name wins.
pub fn load_datasets(dir: &Path) -> Result<Datasets> {
    let mut datasets = Datasets::new();
    for file in discover_entity_files(dir)? {
        let table = read_csv_table(&file.path, file.entity)?;
        if datasets.replace(table).is_some() {
            warn!(
                entity = %file.entity,
                path = %file.path.display(),
                "replacing previously loaded table"
            );
        }
    }
    Ok(datasets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_entity() {
        assert_eq!(detect_entity("Clients.csv"), Some(Entity::Clients));
        assert_eq!(detect_entity("my_workers_v2.csv"), Some(Entity::Workers));
        assert_eq!(detect_entity("TASKS.CSV"), Some(Entity::Tasks));
        assert_eq!(detect_entity("notes.csv"), None);
    }

    #[test]
    fn test_list_csv_files_not_a_directory() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("tasks.csv");
        std::fs::write(&file_path, "TaskID").unwrap();

        let result = list_csv_files(&file_path);
        assert!(result.is_err());
    }
}
