//! Workbook orchestration, filter queries and rule suggestions.

pub mod error;
pub mod filter;
pub mod suggest;
pub mod workbook;

pub use error::{Result, WorkbookError};
pub use filter::{
    FilterCondition, FilterOp, FilterValue, apply_filters, parse_query, resolve_field,
};
pub use suggest::suggest_rules_from_clients;
pub use workbook::Workbook;
