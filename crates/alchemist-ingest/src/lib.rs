//! Data ingestion utilities.
//!
//! This crate loads client, worker and task CSV files into
//! [`alchemist_model::Table`] values.
//!
//! # Features
//!
//! - **CSV Loading**: Read CSV files with header resolution to canonical field names
//! - **Entity Discovery**: Find CSV files in a folder and classify them by file name
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use alchemist_ingest::{load_datasets, read_entity_file};
//!
//! let datasets = load_datasets(Path::new("data/"))?;
//! let tasks = read_entity_file(Path::new("data/tasks.csv"))?;
//! ```

mod csv;
mod discovery;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    normalize_header, parse_csv_table, read_csv_table, resolve_header, resolve_headers,
};

// === File Discovery ===
pub use discovery::{
    DiscoveredFile, detect_entity, discover_entity_files, list_csv_files, load_datasets,
    read_entity_file,
};
