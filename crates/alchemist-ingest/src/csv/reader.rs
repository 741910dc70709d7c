//! CSV file reading into entity tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use alchemist_model::{CellValue, Entity, Row, Table};
use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::header::resolve_headers;

/// Reads a CSV file into a table for `entity`.
///
/// Headers are resolved to canonical field names; every cell is kept as
/// text. Rows whose cells are all blank are skipped.
pub fn read_csv_table(path: &Path, entity: Entity) -> Result<Table> {
    let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
    let table = parse_csv_table(file, entity, path)?;
    tracing::debug!(
        path = %path.display(),
        entity = %entity,
        rows = table.len(),
        columns = table.columns.len(),
        "loaded CSV table"
    );
    Ok(table)
}

/// Parses CSV content from any reader. `path` is only used in errors.
pub fn parse_csv_table<R: Read>(input: R, entity: Entity, path: &Path) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?
        .clone();
    if headers.is_empty() || headers.iter().all(|header| header.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let keys = resolve_headers(headers.iter(), entity);
    let columns: Vec<String> = keys.iter().filter(|key| !key.is_empty()).cloned().collect();

    let mut table = Table::new(entity, columns);
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }

        let mut row = Row::new();
        for (key, value) in keys.iter().zip(record.iter()) {
            if key.is_empty() {
                continue;
            }
            row.insert(key.as_str(), CellValue::from(value));
        }
        table.push_row(row);
    }

    Ok(table)
}
