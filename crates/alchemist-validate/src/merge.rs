//! Error list aggregation.

use alchemist_model::{Entity, ValidationError};

/// Replaces every error of `entity` in `previous` with `fresh`.
///
/// Errors of other entities keep their relative order; `fresh` is appended
/// after them.
pub fn merge_errors<I>(previous: &[ValidationError], entity: Entity, fresh: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = ValidationError>,
{
    previous
        .iter()
        .filter(|error| error.entity != entity)
        .cloned()
        .chain(fresh)
        .collect()
}
