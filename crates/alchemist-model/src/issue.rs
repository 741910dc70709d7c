//! Validation error records.
//!
//! Validation never fails with `Err`; every finding is one of these records,
//! consumed by the editing grid for highlighting and by the JSON export.

use serde::{Deserialize, Serialize};

use crate::Entity;

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    #[default]
    Error,
    Warning,
}

impl IssueKind {
    /// Parse kind from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// A single field-scoped finding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub entity: Entity,
    /// Zero-based row; `None` for table-level and rule-set-level findings.
    #[serde(rename = "rowIndex", with = "row_index")]
    pub row: Option<usize>,
    pub field: String,
    pub message: String,
    pub kind: IssueKind,
}

impl ValidationError {
    /// Row-scoped error.
    pub fn error(
        entity: Entity,
        row: usize,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity,
            row: Some(row),
            field: field.into(),
            message: message.into(),
            kind: IssueKind::Error,
        }
    }

    /// Table-level (or rule-set-level) error, reported with row index `-1`.
    pub fn table_error(entity: Entity, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            entity,
            row: None,
            field: field.into(),
            message: message.into(),
            kind: IssueKind::Error,
        }
    }

    #[must_use]
    pub fn as_warning(mut self) -> Self {
        self.kind = IssueKind::Warning;
        self
    }

    /// Row index in the external convention: `-1` when not row-scoped.
    pub fn row_index(&self) -> i64 {
        self.row.map_or(-1, |row| row as i64)
    }

    pub fn is_error(&self) -> bool {
        self.kind == IssueKind::Error
    }
}

/// Serializes `Option<usize>` as an integer with `-1` standing for `None`.
mod row_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(row: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match row {
            Some(row) => serializer.serialize_u64(*row as u64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let value = i64::deserialize(deserializer)?;
        if value < 0 {
            Ok(None)
        } else {
            usize::try_from(value)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}
