//! Submission parsing from YAML/JSON.

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use super::schema::validate_submission_schema;
use crate::factors::{Answer, MalformedRiskFactorSet, RiskFactorSet};
use crate::record::{parse_assessment_date, Submission};

/// Errors that can occur when reading a submission document.
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Failed to read submission file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Submission does not match schema: {}", .0.join("; "))]
    SchemaError(Vec<String>),

    #[error("Malformed risk factor set: {0}")]
    Malformed(#[from] MalformedRiskFactorSet),

    #[error("Invalid assessment date {0:?} (expected DD/MM/YYYY or YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Document layout, after the schema check.
#[derive(Debug, Deserialize)]
struct RawForm {
    #[serde(default)]
    case_id: Option<Value>,

    #[serde(default)]
    assessment_date: Option<String>,

    #[serde(default)]
    risk_factors: RawEntries,
}

/// Risk factor entries in document order, repeated keys included.
///
/// A map type would keep only the last of two identical keys, hiding the
/// repeat from `RiskFactorSet::from_entries`.
#[derive(Debug, Default)]
struct RawEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of risk factor answers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, serde_json::Value>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Form fields as received from the collaborator.
///
/// Nothing here is validated beyond well-formedness: the case id may be
/// empty and answers may be missing. Those are the validation gate's
/// concern once the form becomes a `Submission`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub case_id: String,

    /// `None` when the document leaves the date out
    pub assessment_date: Option<NaiveDate>,

    pub risk_factors: RiskFactorSet,
}

impl IntakeForm {
    /// Parse a form from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, IntakeError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        check_schema(&value)?;
        let raw: RawForm = serde_yaml::from_str(yaml)?;
        Self::from_raw(raw)
    }

    /// Parse a form from JSON string.
    pub fn from_json(json: &str) -> Result<Self, IntakeError> {
        let value: Value = serde_json::from_str(json)?;
        check_schema(&value)?;
        let raw: RawForm = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Parse a form from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a form from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a form from a file, choosing JSON for `.json` and YAML otherwise.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_yaml_file(path)
        }
    }

    fn from_raw(raw: RawForm) -> Result<Self, IntakeError> {
        let case_id = match raw.case_id {
            Some(Value::String(text)) => text,
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        };

        let assessment_date = match raw.assessment_date {
            Some(text) if !text.trim().is_empty() => match parse_assessment_date(&text) {
                Some(date) => Some(date),
                None => return Err(IntakeError::InvalidDate(text)),
            },
            _ => None,
        };

        let entries = raw
            .risk_factors
            .0
            .into_iter()
            .map(|(key, value)| (key, answer_text(value)));

        let risk_factors = RiskFactorSet::from_entries(entries).inspect_err(|e| {
            warn!(error = %e, "submission rejected: malformed risk factor set");
        })?;

        Ok(Self {
            case_id,
            assessment_date,
            risk_factors,
        })
    }

    /// Finish the form, using `default_date` when no date was given.
    pub fn into_submission(self, default_date: NaiveDate) -> Submission {
        Submission::new(
            self.case_id,
            self.assessment_date.unwrap_or(default_date),
            self.risk_factors,
        )
    }
}

fn check_schema(value: &Value) -> Result<(), IntakeError> {
    validate_submission_schema(value).map_err(|errors| {
        warn!(violations = errors.len(), "submission rejected by schema");
        IntakeError::SchemaError(errors)
    })
}

fn answer_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(Answer::from(flag).as_str().to_string()),
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::RiskFactor;

    const COMPLETE_FORM: &str = r#"
case_id: CASE002
assessment_date: 06/06/2025
risk_factors:
  q1: "No"
  q2: "No"
  q3: "No"
  q4: "No"
  q5: "Yes"
  q6: "No"
  q7: "No"
  q8: "No"
  q9: "No"
  q10: "No"
  q11: "No"
  q12: "No"
  q13: "No"
  q14: "No"
"#;

    #[test]
    fn test_parse_complete_form() {
        let form = IntakeForm::from_yaml(COMPLETE_FORM).unwrap();
        assert_eq!(form.case_id, "CASE002");
        assert_eq!(form.assessment_date, NaiveDate::from_ymd_opt(2025, 6, 6));
        assert!(form.risk_factors.is_complete());
        assert_eq!(form.risk_factors.get(RiskFactor::ImpairedVisual), Answer::Yes);
    }

    #[test]
    fn test_parse_json_with_aliases_and_booleans() {
        let form = IntakeForm::from_json(
            r#"{
                "case_id": 4711,
                "assessment_date": "2025-06-06",
                "risk_factors": { "previous_skin_tear": true, "q1": false, "q2": null }
            }"#,
        )
        .unwrap();

        assert_eq!(form.case_id, "4711");
        assert_eq!(form.risk_factors.get(RiskFactor::PreviousSkinTear), Answer::Yes);
        assert_eq!(form.risk_factors.get(RiskFactor::ChronicDisease), Answer::No);
        assert_eq!(form.risk_factors.get(RiskFactor::Polypharmacy), Answer::Unanswered);
    }

    #[test]
    fn test_missing_fields_default() {
        let form = IntakeForm::from_yaml("risk_factors: {}").unwrap();
        assert_eq!(form.case_id, "");
        assert_eq!(form.assessment_date, None);
        assert_eq!(form.risk_factors, RiskFactorSet::new());
    }

    #[test]
    fn test_unknown_key_is_malformed() {
        let result = IntakeForm::from_yaml(
            r#"
case_id: CASE001
risk_factors:
  q15: "Yes"
"#,
        );
        assert!(matches!(
            result,
            Err(IntakeError::Malformed(MalformedRiskFactorSet::UnknownKey(ref key))) if key == "q15"
        ));
    }

    #[test]
    fn test_repeated_json_key_is_malformed() {
        let result = IntakeForm::from_json(
            r#"{ "case_id": "CASE006", "risk_factors": { "q5": "Yes", "q5": "No" } }"#,
        );
        assert!(matches!(
            result,
            Err(IntakeError::Malformed(MalformedRiskFactorSet::DuplicateKey(
                RiskFactor::ImpairedVisual
            )))
        ));
    }

    #[test]
    fn test_repeated_yaml_key_is_malformed() {
        let result = IntakeForm::from_yaml(
            r#"
case_id: CASE006
risk_factors:
  q5: "Yes"
  q5: "No"
"#,
        );
        assert!(matches!(
            result,
            Err(IntakeError::Malformed(MalformedRiskFactorSet::DuplicateKey(
                RiskFactor::ImpairedVisual
            )))
        ));
    }

    #[test]
    fn test_invalid_answer_is_malformed() {
        let result = IntakeForm::from_yaml("risk_factors:\n  q2: maybe\n");
        assert!(matches!(
            result,
            Err(IntakeError::Malformed(MalformedRiskFactorSet::InvalidAnswer { .. }))
        ));
    }

    #[test]
    fn test_schema_violation() {
        let result = IntakeForm::from_yaml("case_id: CASE001\nrisk_category: high_risk\n");
        assert!(matches!(result, Err(IntakeError::SchemaError(_))));
    }

    #[test]
    fn test_invalid_date() {
        let result = IntakeForm::from_yaml("case_id: CASE001\nassessment_date: 31/02/2025\n");
        assert!(matches!(result, Err(IntakeError::InvalidDate(ref d)) if d == "31/02/2025"));
    }

    #[test]
    fn test_into_submission_uses_default_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let submission = IntakeForm::from_yaml("case_id: CASE001\n")
            .unwrap()
            .into_submission(today);
        assert_eq!(submission.assessment_date, today);

        let submission = IntakeForm::from_yaml(COMPLETE_FORM)
            .unwrap()
            .into_submission(today);
        assert_eq!(
            submission.assessment_date,
            NaiveDate::from_ymd_opt(2025, 6, 6).unwrap()
        );
    }
}
