//! Shared helpers for the row checks.

use std::collections::HashSet;

use alchemist_model::{Entity, Field, ValidationError};

/// Tracks primary keys seen so far in one table.
///
/// The first occurrence of an ID is canonical; every later row carrying the
/// same ID is reported as a duplicate.
pub(crate) struct UniqueIds {
    entity: Entity,
    field: &'static str,
    seen: HashSet<String>,
}

impl UniqueIds {
    pub(crate) fn new(entity: Entity, field: &'static str) -> Self {
        Self {
            entity,
            field,
            seen: HashSet::new(),
        }
    }

    pub(crate) fn check(&mut self, row: usize, id: &Field<String>, errors: &mut Vec<ValidationError>) {
        match id {
            Field::Value(id) => {
                if !self.seen.insert(id.clone()) {
                    errors.push(ValidationError::error(
                        self.entity,
                        row,
                        self.field,
                        format!("Duplicate {}", self.field),
                    ));
                }
            }
            Field::Missing | Field::Invalid(_) => errors.push(ValidationError::error(
                self.entity,
                row,
                self.field,
                format!("{} is required", self.field),
            )),
        }
    }
}

/// Numeric field with an inclusive lower bound.
pub(crate) fn at_least(value: &Field<f64>, minimum: f64) -> bool {
    matches!(value, Field::Value(number) if *number >= minimum)
}

/// Keeps the first occurrence of every item, preserving order.
pub(crate) fn distinct<'a, I>(items: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}
