//! Cleaned table export.

use std::path::Path;

use alchemist_model::Table;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{ReportError, Result};
use crate::write_file;

/// File name used for an entity's cleaned export, e.g. `clients_cleaned.csv`.
pub fn cleaned_file_name(table: &Table) -> String {
    format!("{}_cleaned.csv", table.entity.as_str())
}

/// Encodes a table as CSV: header from `table.columns`, every field quoted,
/// missing cells empty, CRLF line endings.
pub fn cleaned_csv_bytes(table: &Table, path: &Path) -> Result<Vec<u8>> {
    if table.is_empty() {
        return Err(ReportError::EmptyTable {
            entity: table.entity,
        });
    }
    let csv_error = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(&table.columns).map_err(csv_error)?;
    for row in &table.rows {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|column| {
                row.get(column)
                    .and_then(alchemist_model::CellValue::as_text)
                    .map(std::borrow::Cow::into_owned)
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&record).map_err(csv_error)?;
    }

    writer.into_inner().map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e.into_error(),
    })
}

/// Writes a cleaned CSV export of `table` to `path`.
pub fn write_cleaned_csv(table: &Table, path: &Path) -> Result<()> {
    let bytes = cleaned_csv_bytes(table, path)?;
    write_file(path, &bytes)?;
    tracing::info!(
        entity = %table.entity,
        rows = table.len(),
        path = %path.display(),
        "wrote cleaned CSV"
    );
    Ok(())
}
