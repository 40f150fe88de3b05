//! Risk classifier: maps completed answers to a risk category.
//!
//! The classifier applies a fixed two-tier rule, not a weighted score:
//! 1. If no factor is present → NO RISK
//! 2. Else if ANY high-risk indicator is present (q5, q9, q10, q12, q14) → HIGH RISK
//! 3. Else → AT RISK
//!
//! The indicators override regardless of how many other factors are present.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::factors::{CompletedAnswers, RiskFactor};

/// Skin tear risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    NoRisk,
    AtRisk,
    HighRisk,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::NoRisk,
        RiskCategory::AtRisk,
        RiskCategory::HighRisk,
    ];

    /// Label shown on the result view.
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::NoRisk => "No Risk",
            RiskCategory::AtRisk => "At Risk",
            RiskCategory::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category plus the counts that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub category: RiskCategory,

    /// Number of factors answered Yes
    pub total_risks: usize,

    /// High-risk indicators answered Yes, in question order
    pub high_risk_indicators: Vec<RiskFactor>,
}

/// The RiskClassifier turns completed answers into a category.
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify completed answers.
    pub fn classify(&self, answers: &CompletedAnswers) -> RiskCategory {
        if answers.total_risks() == 0 {
            return RiskCategory::NoRisk;
        }

        let indicator_present = RiskFactor::HIGH_RISK_INDICATORS
            .iter()
            .any(|&f| answers.is_present(f));

        if indicator_present {
            RiskCategory::HighRisk
        } else {
            RiskCategory::AtRisk
        }
    }

    /// Classify and keep the supporting counts.
    pub fn assess(&self, answers: &CompletedAnswers) -> RiskAssessment {
        let category = self.classify(answers);
        let total_risks = answers.total_risks();
        let high_risk_indicators: Vec<RiskFactor> = answers
            .positives()
            .filter(|f| f.is_high_risk_indicator())
            .collect();

        debug!(
            %category,
            total_risks,
            indicators = high_risk_indicators.len(),
            "classified risk factors"
        );

        RiskAssessment {
            category,
            total_risks,
            high_risk_indicators,
        }
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify completed answers with the default classifier.
pub fn classify(answers: &CompletedAnswers) -> RiskCategory {
    RiskClassifier::new().classify(answers)
}
