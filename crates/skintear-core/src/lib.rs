//! # skintear-core
//!
//! Deterministic skin tear risk classification engine.
//!
//! This crate answers, for one intake form submission:
//! - Is the submission complete enough to classify?
//! - Which risk category does the patient fall into?
//! - Which nursing guidance applies?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same answers always produce the same category
//! 2. **Gated**: Nothing is classified without a case number and all fourteen answers
//! 3. **Stateless**: Every submission is handled on its own; nothing is stored
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use skintear_core::{assess, Answer, RiskCategory, RiskFactor, RiskFactorSet, Submission};
//!
//! let answers = RiskFactorSet::uniform(Answer::No).with(RiskFactor::ImpairedVisual, Answer::Yes);
//! let date = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
//! let report = assess(&Submission::new("CASE002", date, answers)).unwrap();
//!
//! assert_eq!(report.risk_category, RiskCategory::HighRisk);
//! assert_eq!(report.assessment_date, "06/06/2025");
//! ```

pub mod classifier;
pub mod factors;
pub mod guidance;
pub mod intake;
pub mod patterns;
pub mod record;
pub mod report;
pub mod validator;

// Re-export main types at crate root
pub use classifier::{classify, RiskAssessment, RiskCategory, RiskClassifier};
pub use factors::{Answer, CompletedAnswers, MalformedRiskFactorSet, RiskFactor, RiskFactorSet, Section};
pub use guidance::{select_template, GuidanceTemplate};
pub use intake::{IntakeError, IntakeForm};
pub use record::{AssessmentRecord, Submission};
pub use report::AssessmentReport;
pub use validator::{validate, ValidationError};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while assessing a submission document.
#[derive(Error, Debug)]
pub enum AssessmentError {
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Assess one submission: validate, classify, select guidance.
///
/// This is the main entry point for the form collaborator.
///
/// # Returns
///
/// An `AssessmentReport` containing:
/// - `risk_category`: NO RISK, AT RISK, or HIGH RISK
/// - `total_risks`: how many factors were answered Yes
/// - `guidance`: the nursing guidance block for the category
///
/// or the `ValidationError` the user must correct before resubmitting.
pub fn assess(submission: &Submission) -> Result<AssessmentReport, ValidationError> {
    let record = submission.validate()?;
    let assessment = RiskClassifier::new().assess(record.answers());

    debug!(category = %assessment.category, "assessment complete");

    Ok(AssessmentReport::new(&record, assessment))
}

/// Assess a YAML submission document.
///
/// # Arguments
///
/// * `yaml` - The submission document
/// * `default_date` - Assessment date used when the document has none
pub fn assess_yaml(yaml: &str, default_date: NaiveDate) -> Result<AssessmentReport, AssessmentError> {
    let submission = IntakeForm::from_yaml(yaml)?.into_submission(default_date);
    Ok(assess(&submission)?)
}

/// Assess a JSON submission document.
pub fn assess_json(json: &str, default_date: NaiveDate) -> Result<AssessmentReport, AssessmentError> {
    let submission = IntakeForm::from_json(json)?.into_submission(default_date);
    Ok(assess(&submission)?)
}
