//! Submissions and the validated records built from them.
//!
//! A `Submission` is what the form collaborator hands over. It only becomes
//! an `AssessmentRecord` after passing the validation gate, so a record
//! always has a case number and a full set of answers.

use chrono::NaiveDate;
use serde::Serialize;

use crate::factors::{CompletedAnswers, RiskFactorSet};
use crate::patterns;
use crate::validator::{self, ValidationError};

/// Date format used on the result view.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One form submission, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub case_id: String,
    pub assessment_date: NaiveDate,
    pub risk_factors: RiskFactorSet,
}

impl Submission {
    pub fn new(
        case_id: impl Into<String>,
        assessment_date: NaiveDate,
        risk_factors: RiskFactorSet,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            assessment_date,
            risk_factors,
        }
    }

    /// Run the validation gate.
    pub fn validate(&self) -> Result<AssessmentRecord, ValidationError> {
        let answers = validator::validate(&self.case_id, &self.risk_factors)?;
        Ok(AssessmentRecord {
            case_id: self.case_id.clone(),
            assessment_date: self.assessment_date,
            risk_factors: self.risk_factors,
            answers,
        })
    }
}

/// A validated submission. Lives for a single request and is never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRecord {
    case_id: String,
    assessment_date: NaiveDate,
    risk_factors: RiskFactorSet,
    answers: CompletedAnswers,
}

impl AssessmentRecord {
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    pub fn assessment_date(&self) -> NaiveDate {
        self.assessment_date
    }

    pub fn risk_factors(&self) -> &RiskFactorSet {
        &self.risk_factors
    }

    pub fn answers(&self) -> &CompletedAnswers {
        &self.answers
    }
}

/// Parse an assessment date written as DD/MM/YYYY or YYYY-MM-DD.
///
/// Returns `None` for any other shape and for dates that do not exist
/// (31/02/2025).
pub fn parse_assessment_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if patterns::is_day_first_date(text) {
        NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
    } else if patterns::is_iso_date(text) {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    } else {
        None
    }
}

/// Format a date the way the result view shows it.
pub fn format_assessment_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::Answer;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_day_first() {
        assert_eq!(parse_assessment_date("06/06/2025"), Some(date(2025, 6, 6)));
        assert_eq!(parse_assessment_date("6/6/2025"), Some(date(2025, 6, 6)));
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_assessment_date("2025-06-06"), Some(date(2025, 6, 6)));
    }

    #[test]
    fn test_parse_rejects_impossible_and_unknown() {
        assert_eq!(parse_assessment_date("31/02/2025"), None);
        assert_eq!(parse_assessment_date("06-06-2025"), None);
        assert_eq!(parse_assessment_date("yesterday"), None);
    }

    #[test]
    fn test_format_is_day_first() {
        assert_eq!(format_assessment_date(date(2025, 1, 9)), "09/01/2025");
    }

    #[test]
    fn test_validate_builds_record() {
        let submission = Submission::new(
            "CASE001",
            date(2025, 6, 6),
            RiskFactorSet::uniform(Answer::No),
        );
        let record = submission.validate().unwrap();
        assert_eq!(record.case_id(), "CASE001");
        assert_eq!(record.assessment_date(), date(2025, 6, 6));
        assert_eq!(record.answers().total_risks(), 0);
        assert!(record.risk_factors().is_complete());
    }

    #[test]
    fn test_validate_propagates_gate_errors() {
        let submission = Submission::new("", date(2025, 6, 6), RiskFactorSet::new());
        assert_eq!(submission.validate(), Err(ValidationError::MissingCaseId));
    }
}
