//! Simple filter queries over a table.
//!
//! A query is a list of `field op value` clauses joined by `AND`, e.g.
//! `PriorityLevel > 3 AND GroupTag = A`. Every clause must hold for a row
//! to match.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use alchemist_model::records::coerce_number;
use alchemist_model::{CellValue, Entity, Field, Row, Table};
use regex::Regex;

static AND_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+").expect("Invalid AND regex"));

static CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\s*(>=|<=|=|>|<)\s*(.+)").expect("Invalid filter clause regex")
});

/// Comparison operator of a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Gt => ">",
            FilterOp::Lt => "<",
            FilterOp::Ge => ">=",
            FilterOp::Le => "<=",
            FilterOp::Eq => "=",
        }
    }
}

impl FromStr for FilterOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(FilterOp::Gt),
            "<" => Ok(FilterOp::Lt),
            ">=" => Ok(FilterOp::Ge),
            "<=" => Ok(FilterOp::Le),
            "=" => Ok(FilterOp::Eq),
            other => Err(format!("unknown filter operator '{other}'")),
        }
    }
}

/// Right-hand side of a clause: numeric when it parses as a number.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => FilterValue::Number(number),
            _ => FilterValue::Text(trimmed.to_string()),
        }
    }

    fn as_text(&self) -> String {
        match self {
            FilterValue::Number(number) => CellValue::Number(*number)
                .as_text()
                .map(std::borrow::Cow::into_owned)
                .unwrap_or_default(),
            FilterValue::Text(text) => text.clone(),
        }
    }
}

/// One `field op value` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub field: String,
    pub op: FilterOp,
    pub value: FilterValue,
}

impl FilterCondition {
    /// Whether `row` satisfies the clause. An absent cell never matches.
    ///
    /// Ordering operators compare numbers and fail for non-numeric cells or
    /// values; `=` compares the string forms.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(cell) = row.get(&self.field) else {
            return false;
        };
        let Some(text) = cell.as_text() else {
            return false;
        };

        if self.op == FilterOp::Eq {
            return text == self.value.as_text();
        }

        let (Field::Value(number), FilterValue::Number(value)) =
            (coerce_number(Some(cell)), &self.value)
        else {
            return false;
        };
        match self.op {
            FilterOp::Gt => number > *value,
            FilterOp::Lt => number < *value,
            FilterOp::Ge => number >= *value,
            FilterOp::Le => number <= *value,
            FilterOp::Eq => false,
        }
    }

    /// Replaces the field with the entity's closest canonical field name.
    #[must_use]
    pub fn resolved(mut self, entity: Entity) -> Self {
        self.field = resolve_field(&self.field, entity);
        self
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op.as_str(), self.value.as_text())
    }
}

/// Parses a query into conditions. Clauses that do not parse are dropped.
pub fn parse_query(query: &str) -> Vec<FilterCondition> {
    AND_SPLIT_REGEX
        .split(query.trim())
        .filter_map(|clause| {
            let captures = CLAUSE_REGEX.captures(clause)?;
            let op = captures[2].parse().ok()?;
            Some(FilterCondition {
                field: captures[1].to_string(),
                op,
                value: FilterValue::parse(&captures[3]),
            })
        })
        .collect()
}

/// Maps a field name onto the entity's schema.
///
/// Tries a case-insensitive exact match, then the first schema field that
/// contains the name, then the field with the smallest edit distance.
/// Entities without a schema keep the name unchanged.
pub fn resolve_field(field: &str, entity: Entity) -> String {
    let schema = entity.known_fields();
    let lower = field.to_lowercase();

    if let Some(exact) = schema.iter().find(|name| name.to_lowercase() == lower) {
        return (*exact).to_string();
    }
    if let Some(partial) = schema.iter().find(|name| name.to_lowercase().contains(&lower)) {
        return (*partial).to_string();
    }
    schema
        .iter()
        .min_by_key(|name| levenshtein(&lower, &name.to_lowercase()))
        .map_or_else(|| field.to_string(), |name| (*name).to_string())
}

/// Indices of the rows matching every condition, in table order.
pub fn apply_filters(table: &Table, conditions: &[FilterCondition]) -> Vec<usize> {
    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| conditions.iter().all(|condition| condition.matches(row)))
        .map(|(index, _)| index)
        .collect()
}

/// Edit distance between two strings, by characters.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, left) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, right) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(left != *right);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
