//! Workbook errors.

use alchemist_model::{Entity, Rule};
use thiserror::Error;

/// Operations the workbook refuses to perform.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// The rule failed the shape check and was not added.
    #[error("rule {rule} rejected: {message}")]
    RuleRejected { rule: Box<Rule>, message: String },

    /// Only client, worker and task tables can be loaded.
    #[error("{entity} is not a table entity")]
    NotATable { entity: Entity },
}

impl WorkbookError {
    /// The shape message for a rejected rule.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            WorkbookError::RuleRejected { message, .. } => Some(message),
            WorkbookError::NotATable { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkbookError>;
