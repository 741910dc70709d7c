//! Required-column checks.

use alchemist_model::{Table, ValidationError};

/// Reports every required column absent from the table's first row.
///
/// The first row's keys stand in for the header. An empty table has nothing
/// to check and yields no errors.
pub fn validate_structure(table: &Table) -> Vec<ValidationError> {
    let Some(first) = table.rows.first() else {
        return Vec::new();
    };

    table
        .entity
        .required_columns()
        .iter()
        .filter(|column| !first.contains(column))
        .map(|column| {
            ValidationError::table_error(
                table.entity,
                *column,
                format!("{column} column is missing"),
            )
        })
        .collect()
}
