use std::path::PathBuf;

use alchemist_cli::session::Session;
use alchemist_model::PrioritizationWeights;

#[derive(Debug)]
pub struct ValidateResult {
    pub session: Session,
    pub errors_out: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl ValidateResult {
    pub fn has_errors(&self) -> bool {
        self.session.has_errors()
    }
}

#[derive(Debug)]
pub struct RulesResult {
    pub rules_file: PathBuf,
    pub session: Session,
}

impl RulesResult {
    pub fn has_errors(&self) -> bool {
        !self.session.rejected.is_empty()
            || self
                .session
                .workbook
                .errors_for(alchemist_model::Entity::Rules)
                .any(alchemist_model::ValidationError::is_error)
    }
}

#[derive(Debug)]
pub struct ExportResult {
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    pub weights: PrioritizationWeights,
    pub session: Session,
}
