//! CSV reading utilities.

mod header;
mod reader;

pub use header::{normalize_header, resolve_header, resolve_headers};
pub use reader::{parse_csv_table, read_csv_table};
