//! Validation gate run before classification.
//!
//! A submission may only be classified once it names a case and every one
//! of the fourteen questions has been answered. A missing case number is
//! reported ahead of unanswered questions.

use thiserror::Error;
use tracing::debug;

use crate::factors::{CompletedAnswers, RiskFactor, RiskFactorSet};

/// Why a submission was turned back to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a Case Number")]
    MissingCaseId,

    #[error("Please answer all risk factor questions")]
    IncompleteAnswers { unanswered: Vec<RiskFactor> },
}

impl ValidationError {
    /// Stable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingCaseId => "MissingCaseId",
            ValidationError::IncompleteAnswers { .. } => "IncompleteAnswers",
        }
    }
}

/// Check a case id and answers, returning the answers as booleans.
pub fn validate(
    case_id: &str,
    risk_factors: &RiskFactorSet,
) -> Result<CompletedAnswers, ValidationError> {
    if case_id.trim().is_empty() {
        debug!("submission rejected: missing case id");
        return Err(ValidationError::MissingCaseId);
    }

    risk_factors.completed().ok_or_else(|| {
        let unanswered = risk_factors.unanswered();
        debug!(unanswered = unanswered.len(), "submission rejected: incomplete answers");
        ValidationError::IncompleteAnswers { unanswered }
    })
}
