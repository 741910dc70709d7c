//! Export errors.

use std::path::PathBuf;

use alchemist_model::{Entity, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode CSV for {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Nothing to export for this entity.
    #[error("no {entity} rows to export")]
    EmptyTable { entity: Entity },
}

pub type Result<T> = std::result::Result<T, ReportError>;
