use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
    #[error("invalid rule JSON: {0}")]
    InvalidRule(#[from] serde_json::Error),
    #[error("rules document must be a JSON array")]
    RulesNotArray,
    #[error("{name} weight {value} is outside 0..=10")]
    WeightOutOfRange { name: &'static str, value: u8 },
    #[error("unknown weight preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
