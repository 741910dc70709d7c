//! Property tests for the row checks and the error reducer.

use alchemist_model::{CellValue, Entity, Row, Table, ValidationError};
use alchemist_validate::{merge_errors, validate_clients, validate_table};
use proptest::prelude::*;

fn client_row(index: usize, priority: &CellValue) -> Row {
    Row::from_pairs([
        ("ClientID", CellValue::from(format!("C{index}"))),
        ("PriorityLevel", priority.clone()),
        ("RequestedTaskIDs", CellValue::from("T1")),
        ("GroupTag", CellValue::from("GA")),
        ("AttributesJSON", CellValue::from("{}")),
    ])
}

fn priority_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        (-3i32..9).prop_map(|value| CellValue::Number(f64::from(value))),
        (-3i32..9).prop_map(|value| CellValue::from(value.to_string())),
        "[a-z]{1,6}".prop_map(CellValue::from),
        Just(CellValue::Missing),
    ]
}

fn is_valid_priority(cell: &CellValue) -> bool {
    let number = match cell {
        CellValue::Number(number) => Some(*number),
        CellValue::Text(text) => text.trim().parse::<f64>().ok(),
        CellValue::Missing => None,
    };
    number.is_some_and(|number| (1.0..=5.0).contains(&number))
}

fn entity_strategy() -> impl Strategy<Value = Entity> {
    prop_oneof![
        Just(Entity::Clients),
        Just(Entity::Workers),
        Just(Entity::Tasks),
        Just(Entity::Rules),
    ]
}

fn error_strategy() -> impl Strategy<Value = ValidationError> {
    (entity_strategy(), 0usize..20, "[A-Za-z]{1,8}")
        .prop_map(|(entity, row, field)| ValidationError::error(entity, row, field, "problem"))
}

proptest! {
    #[test]
    fn priority_error_exactly_for_out_of_range_rows(cells in prop::collection::vec(priority_cell(), 0..12)) {
        let rows = cells.iter().enumerate().map(|(index, cell)| client_row(index, cell)).collect();
        let errors = validate_clients(&Table::from_rows(Entity::Clients, rows));
        for (index, cell) in cells.iter().enumerate() {
            let count = errors
                .iter()
                .filter(|error| error.row == Some(index) && error.field == "PriorityLevel")
                .count();
            prop_assert_eq!(count, usize::from(!is_valid_priority(cell)));
        }
    }

    #[test]
    fn validation_is_idempotent(cells in prop::collection::vec(priority_cell(), 0..12)) {
        let rows: Vec<Row> = cells
            .iter()
            .enumerate()
            .map(|(index, cell)| client_row(index % 4, cell))
            .collect();
        let table = Table::from_rows(Entity::Clients, rows);
        prop_assert_eq!(validate_table(&table), validate_table(&table));
    }

    #[test]
    fn merge_replaces_only_the_given_entity(
        previous in prop::collection::vec(error_strategy(), 0..20),
        fresh in prop::collection::vec(error_strategy(), 0..5),
        entity in entity_strategy(),
    ) {
        let fresh: Vec<ValidationError> = fresh
            .into_iter()
            .map(|mut error| { error.entity = entity; error })
            .collect();
        let merged = merge_errors(&previous, entity, fresh.clone());

        let kept: Vec<&ValidationError> = previous.iter().filter(|error| error.entity != entity).collect();
        prop_assert_eq!(merged.len(), kept.len() + fresh.len());
        prop_assert!(merged[..kept.len()].iter().zip(kept).all(|(left, right)| left == right));
        prop_assert_eq!(&merged[merged.len() - fresh.len()..], fresh.as_slice());
    }
}
