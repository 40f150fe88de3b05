//! Care guidance shown for each risk category.
//!
//! HIGH RISK and AT RISK share their plan, interventions and evaluation
//! word for word and differ only in the objective-data statement. The two
//! templates are kept as separate constants so either can change on its own.

use serde::Serialize;

use crate::classifier::RiskCategory;

/// Fixed block of nursing guidance for one risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuidanceTemplate {
    pub category: RiskCategory,

    /// Objective data statement
    pub objective_data: &'static str,

    /// Nursing problem list entry
    pub problem_list: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<&'static str>,

    #[serde(skip_serializing_if = "no_interventions")]
    pub interventions: &'static [&'static str],

    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

pub const HIGH_RISK_GUIDANCE: GuidanceTemplate = GuidanceTemplate {
    category: RiskCategory::HighRisk,
    objective_data: "Patient is at high risk for skin tear",
    problem_list: "Risk for Impaired skin integrity",
    plan: Some("To prevent skin break down"),
    interventions: &[
        "Continue skin assessment",
        "Identify change of skin condition",
        "Inform team Dr and family member",
        "Re-apply the wrist tag at lower risk area",
        "Implement Skin Tear Prevention Care Bundle",
        "Skin care education to caregiver",
    ],
    evaluation: Some("Indicate patient's skin condition at the end of the shift"),
    note: None,
};

pub const AT_RISK_GUIDANCE: GuidanceTemplate = GuidanceTemplate {
    category: RiskCategory::AtRisk,
    objective_data: "Patient is at risk for skin tear",
    problem_list: "Risk for Impaired skin integrity",
    plan: Some("To prevent skin break down"),
    interventions: &[
        "Continue skin assessment",
        "Identify change of skin condition",
        "Inform team Dr and family member",
        "Re-apply the wrist tag at lower risk area",
        "Implement Skin Tear Prevention Care Bundle",
        "Skin care education to caregiver",
    ],
    evaluation: Some("Indicate patient's skin condition at the end of the shift"),
    note: None,
};

pub const NO_RISK_GUIDANCE: GuidanceTemplate = GuidanceTemplate {
    category: RiskCategory::NoRisk,
    objective_data: "Patient has no risk for skin tear",
    problem_list: "N.A.",
    plan: None,
    interventions: &[],
    evaluation: None,
    note: Some(
        "Upon admission/transfer in, if patient has no risk for skin tear, \
         indicate the date of assessment and finding in special mention.",
    ),
};

/// Select the guidance template for a category.
pub fn select_template(category: RiskCategory) -> &'static GuidanceTemplate {
    match category {
        RiskCategory::HighRisk => &HIGH_RISK_GUIDANCE,
        RiskCategory::AtRisk => &AT_RISK_GUIDANCE,
        RiskCategory::NoRisk => &NO_RISK_GUIDANCE,
    }
}

impl GuidanceTemplate {
    /// Render the template as Markdown sections, in form order.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        push_section(&mut out, "Objective data", self.objective_data);
        push_section(&mut out, "Nursing problem list", self.problem_list);

        if let Some(plan) = self.plan {
            push_section(&mut out, "Plan", plan);
        }

        if !self.interventions.is_empty() {
            out.push_str("##### Intervention:\n");
            for item in self.interventions {
                out.push_str(&format!("- {}\n", item));
            }
            out.push('\n');
        }

        if let Some(evaluation) = self.evaluation {
            push_section(&mut out, "Evaluation", evaluation);
        }

        if let Some(note) = self.note {
            push_section(&mut out, "Note", note);
        }

        out
    }
}

fn no_interventions(items: &&'static [&'static str]) -> bool {
    items.is_empty()
}

fn push_section(out: &mut String, heading: &str, body: &str) {
    out.push_str(&format!("##### {}:\n{}\n\n", heading, body));
}
