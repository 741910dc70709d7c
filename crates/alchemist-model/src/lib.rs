pub mod datasets;
pub mod entity;
pub mod error;
pub mod issue;
pub mod records;
pub mod rule;
pub mod table;
pub mod weights;

pub use datasets::{CompleteDatasets, Datasets};
pub use entity::Entity;
pub use error::{ModelError, Result};
pub use issue::{IssueKind, ValidationError};
pub use records::{ClientRecord, Field, TaskRecord, WorkerRecord};
pub use rule::{
    CoRunConfig, LoadLimitConfig, PhaseWindowConfig, Rule, RulesDocument, SlotRestrictionConfig,
};
pub use table::{CellValue, Row, Table};
pub use weights::{MAX_WEIGHT, PrioritizationWeights, WeightPreset};
