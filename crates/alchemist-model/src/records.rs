//! Typed views over raw rows.
//!
//! Rows arrive as loosely typed field maps. Each entity gets a record type
//! built by an explicit coercion step, so validators deal with
//! [`Field::Missing`] / [`Field::Invalid`] instead of re-parsing strings.

use serde_json::Value;

use crate::table::{CellValue, Row};

/// Outcome of coercing one raw cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Column absent, cell missing, or blank text.
    Missing,
    /// Present but not coercible; carries the raw text.
    Invalid(String),
    Value(T),
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }
}

/// Coerces a cell to a finite number.
pub fn coerce_number(cell: Option<&CellValue>) -> Field<f64> {
    match cell {
        None | Some(CellValue::Missing) => Field::Missing,
        Some(CellValue::Number(value)) if value.is_finite() => Field::Value(*value),
        Some(CellValue::Number(value)) => Field::Invalid(value.to_string()),
        Some(CellValue::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Field::Missing;
            }
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Field::Value(value),
                _ => Field::Invalid(raw.clone()),
            }
        }
    }
}

/// Coerces a cell to trimmed, non-blank text.
pub fn coerce_text(cell: Option<&CellValue>) -> Field<String> {
    match cell.and_then(CellValue::as_text) {
        None => Field::Missing,
        Some(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Field::Missing
            } else {
                Field::Value(trimmed.to_string())
            }
        }
    }
}

/// Raw, untrimmed text of a cell, for JSON-encoded fields.
fn raw_text(cell: Option<&CellValue>) -> Field<String> {
    match cell.and_then(CellValue::as_text) {
        None => Field::Missing,
        Some(text) if text.trim().is_empty() => Field::Missing,
        Some(text) => Field::Value(text.into_owned()),
    }
}

fn optional_text(cell: Option<&CellValue>) -> Option<String> {
    coerce_text(cell).into_value()
}

/// Splits a comma-separated list, trimming every token. Blank tokens are kept.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|token| token.trim().to_string()).collect()
}

/// Decodes a JSON-encoded list of tags.
///
/// Strings are kept as-is, numbers use their JSON rendering, anything else
/// (nested arrays, objects, booleans, null) is dropped.
pub fn decode_tag_list(cell: Option<&CellValue>) -> Field<Vec<String>> {
    let raw = match raw_text(cell) {
        Field::Value(raw) => raw,
        Field::Missing => return Field::Missing,
        Field::Invalid(raw) => return Field::Invalid(raw),
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => Field::Value(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
                .collect(),
        ),
        _ => Field::Invalid(raw),
    }
}

/// Decodes a JSON-encoded list of slot numbers; every element must be numeric.
///
/// Elements may be JSON numbers or numeric strings. Booleans, `null` and
/// blank strings are not coerced to `0`/`1`; they make the whole list
/// invalid, so `[""]` or `[true]` is reported rather than read as slot 0 or 1.
pub fn decode_number_list(cell: Option<&CellValue>) -> Field<Vec<f64>> {
    let raw = match raw_text(cell) {
        Field::Value(raw) => raw,
        Field::Missing => return Field::Missing,
        Field::Invalid(raw) => return Field::Invalid(raw),
    };
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&raw) else {
        return Field::Invalid(raw);
    };
    let mut numbers = Vec::with_capacity(items.len());
    for item in &items {
        let number = match item {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            Some(number) if number.is_finite() => numbers.push(number),
            _ => return Field::Invalid(raw),
        }
    }
    Field::Value(numbers)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub client_id: Field<String>,
    pub client_name: Option<String>,
    pub priority_level: Field<f64>,
    /// Trimmed tokens of `RequestedTaskIDs`, blanks included.
    pub requested_task_ids: Field<Vec<String>>,
    pub group_tag: Option<String>,
    /// Raw `AttributesJSON` text.
    pub attributes_json: Field<String>,
}

impl ClientRecord {
    pub fn from_row(row: &Row) -> Self {
        let requested_task_ids = match row.text("RequestedTaskIDs") {
            Some(raw) if !raw.trim().is_empty() => Field::Value(split_list(&raw)),
            _ => Field::Missing,
        };
        Self {
            client_id: coerce_text(row.get("ClientID")),
            client_name: optional_text(row.get("ClientName")),
            priority_level: coerce_number(row.get("PriorityLevel")),
            requested_task_ids,
            group_tag: optional_text(row.get("GroupTag")),
            attributes_json: raw_text(row.get("AttributesJSON")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkerRecord {
    pub worker_id: Field<String>,
    pub worker_name: Option<String>,
    pub skills: Field<Vec<String>>,
    pub available_slots: Field<Vec<f64>>,
    pub max_load_per_phase: Field<f64>,
    pub worker_group: Option<String>,
    pub qualification_level: Option<String>,
}

impl WorkerRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            worker_id: coerce_text(row.get("WorkerID")),
            worker_name: optional_text(row.get("WorkerName")),
            skills: decode_tag_list(row.get("Skills")),
            available_slots: decode_number_list(row.get("AvailableSlots")),
            max_load_per_phase: coerce_number(row.get("MaxLoadPerPhase")),
            worker_group: optional_text(row.get("WorkerGroup")),
            qualification_level: optional_text(row.get("QualificationLevel")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    pub task_id: Field<String>,
    pub task_name: Option<String>,
    pub category: Option<String>,
    pub duration: Field<f64>,
    pub required_skills: Field<Vec<String>>,
    /// Non-blank text value of `PreferredPhases`; numeric cells are not kept.
    pub preferred_phases: Option<String>,
    pub max_concurrent: Field<f64>,
}

impl TaskRecord {
    pub fn from_row(row: &Row) -> Self {
        let preferred_phases = match row.get("PreferredPhases") {
            Some(CellValue::Text(raw)) if !raw.trim().is_empty() => Some(raw.clone()),
            _ => None,
        };
        Self {
            task_id: coerce_text(row.get("TaskID")),
            task_name: optional_text(row.get("TaskName")),
            category: optional_text(row.get("Category")),
            duration: coerce_number(row.get("Duration")),
            required_skills: decode_tag_list(row.get("RequiredSkills")),
            preferred_phases,
            max_concurrent: coerce_number(row.get("MaxConcurrent")),
        }
    }
}
