#![deny(unsafe_code)]

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Entity;

/// A raw cell as it arrives from ingestion or an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    /// String form of the cell; `None` for missing cells.
    ///
    /// Whole numbers render without a fractional part (`5`, not `5.0`).
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Text(value) => Some(Cow::Borrowed(value.as_str())),
            CellValue::Number(value) => Some(Cow::Owned(format_number(*value))),
            CellValue::Missing => None,
        }
    }

    /// True for missing cells and text cells that are blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(value) => value.trim().is_empty(),
            CellValue::Number(_) => false,
            CellValue::Missing => true,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// One row: field name to raw cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(field, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }

    /// Whether the field key exists, regardless of its value.
    pub fn contains(&self, field: &str) -> bool {
        self.cells.contains_key(field)
    }

    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).and_then(CellValue::as_text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

/// A whole uploaded table for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub entity: Entity,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(entity: Entity, columns: Vec<String>) -> Self {
        Self {
            entity,
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from rows, taking the column order from the first row.
    pub fn from_rows(entity: Entity, rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default();
        Self {
            entity,
            columns,
            rows,
        }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field names present on the first row, used for structural checks.
    pub fn first_row_keys(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().collect())
            .unwrap_or_default()
    }
}
