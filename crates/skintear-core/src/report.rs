//! Result payload handed back to the form collaborator.

use serde::Serialize;

use crate::classifier::{RiskAssessment, RiskCategory};
use crate::factors::RiskFactor;
use crate::guidance::{select_template, GuidanceTemplate};
use crate::record::{format_assessment_date, AssessmentRecord};

/// Everything the result view shows for one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentReport {
    pub case_id: String,

    /// Formatted DD/MM/YYYY
    pub assessment_date: String,

    pub risk_category: RiskCategory,

    /// Number of factors answered Yes (out of fourteen)
    pub total_risks: usize,

    /// High-risk indicators that were present
    pub high_risk_indicators: Vec<RiskFactor>,

    pub guidance: &'static GuidanceTemplate,
}

impl AssessmentReport {
    /// Build the payload for a classified record.
    pub fn new(record: &AssessmentRecord, assessment: RiskAssessment) -> Self {
        Self {
            case_id: record.case_id().to_string(),
            assessment_date: format_assessment_date(record.assessment_date()),
            risk_category: assessment.category,
            total_risks: assessment.total_risks,
            high_risk_indicators: assessment.high_risk_indicators,
            guidance: select_template(assessment.category),
        }
    }

    /// Render the result view as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("### Assessment Results\n\n");
        out.push_str(&format!("**Case Number:** {}\n", self.case_id));
        out.push_str(&format!("**Assessment Date:** {}\n", self.assessment_date));
        out.push_str(&format!("**Risk Category:** {}\n", self.risk_category));
        out.push_str(&format!(
            "**Risk factors present:** {} of {}\n",
            self.total_risks,
            RiskFactor::COUNT
        ));

        if !self.high_risk_indicators.is_empty() {
            let labels: Vec<&str> = self.high_risk_indicators.iter().map(|f| f.label()).collect();
            out.push_str(&format!("**High-risk indicators:** {}\n", labels.join(", ")));
        }

        out.push('\n');
        out.push_str(&self.guidance.to_markdown());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RiskClassifier;
    use crate::factors::{Answer, RiskFactorSet};
    use crate::record::Submission;
    use chrono::NaiveDate;

    fn report_for(set: RiskFactorSet) -> AssessmentReport {
        let date = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        let record = Submission::new("CASE009", date, set).validate().unwrap();
        let assessment = RiskClassifier::new().assess(record.answers());
        AssessmentReport::new(&record, assessment)
    }

    #[test]
    fn test_report_fields() {
        let report = report_for(
            RiskFactorSet::uniform(Answer::No).with(RiskFactor::ExtremeAge, Answer::Yes),
        );
        assert_eq!(report.case_id, "CASE009");
        assert_eq!(report.assessment_date, "06/06/2025");
        assert_eq!(report.risk_category, RiskCategory::HighRisk);
        assert_eq!(report.total_risks, 1);
        assert_eq!(report.high_risk_indicators, vec![RiskFactor::ExtremeAge]);
        assert_eq!(report.guidance.category, RiskCategory::HighRisk);
    }

    #[test]
    fn test_markdown_view() {
        let report = report_for(
            RiskFactorSet::uniform(Answer::No).with(RiskFactor::ImpairedVisual, Answer::Yes),
        );
        let view = report.to_markdown();

        assert!(view.starts_with("### Assessment Results"));
        assert!(view.contains("**Case Number:** CASE009"));
        assert!(view.contains("**Assessment Date:** 06/06/2025"));
        assert!(view.contains("**Risk Category:** High Risk"));
        assert!(view.contains("**High-risk indicators:** Impaired visual"));
        assert!(view.contains("Patient is at high risk for skin tear"));
    }

    #[test]
    fn test_no_risk_view_omits_indicators() {
        let view = report_for(RiskFactorSet::uniform(Answer::No)).to_markdown();
        assert!(view.contains("**Risk Category:** No Risk"));
        assert!(view.contains("**Risk factors present:** 0 of 14"));
        assert!(!view.contains("High-risk indicators"));
        assert!(view.contains("N.A."));
    }

    #[test]
    fn test_json_payload() {
        let report = report_for(
            RiskFactorSet::uniform(Answer::No).with(RiskFactor::FragileSkin, Answer::Yes),
        );
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["risk_category"], "at_risk");
        assert_eq!(value["assessment_date"], "06/06/2025");
        assert_eq!(value["guidance"]["objective_data"], "Patient is at risk for skin tear");
        assert_eq!(value["high_risk_indicators"].as_array().unwrap().len(), 0);
    }
}
