//! Risk factors and the answers recorded against them.
//!
//! The intake form asks fourteen fixed yes/no questions. A `RiskFactorSet`
//! holds exactly one `Answer` per question, so a missing or fifteenth factor
//! cannot be represented once the set is built.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::patterns;

/// Out-of-contract input while building a `RiskFactorSet`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRiskFactorSet {
    #[error("Unrecognized risk factor key: {0}")]
    UnknownKey(String),

    #[error("Risk factor {0} answered more than once")]
    DuplicateKey(RiskFactor),

    #[error("Invalid answer for {factor}: {value:?} (expected Yes or No)")]
    InvalidAnswer { factor: RiskFactor, value: String },
}

/// Answer to a single risk factor question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unanswered,
}

impl Answer {
    /// Parse a form answer. Empty text is `Unanswered`; anything that is not
    /// a recognisable yes/no returns `None`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" => Some(Answer::Yes),
            "no" | "n" | "false" => Some(Answer::No),
            "" => Some(Answer::Unanswered),
            _ => None,
        }
    }

    pub fn is_answered(self) -> bool {
        !matches!(self, Answer::Unanswered)
    }

    /// `Yes` → true, `No` → false, `Unanswered` → None.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Answer::Yes => Some(true),
            Answer::No => Some(false),
            Answer::Unanswered => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::Unanswered => "",
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value {
            Answer::Yes
        } else {
            Answer::No
        }
    }
}

/// Form section a question is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    GeneralHealth,
    Mobility,
    Skin,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::GeneralHealth, Section::Mobility, Section::Skin];

    pub fn label(self) -> &'static str {
        match self {
            Section::GeneralHealth => "General Health",
            Section::Mobility => "Mobility",
            Section::Skin => "Skin",
        }
    }
}

/// One of the fourteen fixed clinical questions.
///
/// Serialized by positional key (`q1`..`q14`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskFactor {
    #[serde(rename = "q1")]
    ChronicDisease,
    #[serde(rename = "q2")]
    Polypharmacy,
    #[serde(rename = "q3")]
    ImpairedCognitive,
    #[serde(rename = "q4")]
    ImpairedSensory,
    #[serde(rename = "q5")]
    ImpairedVisual,
    #[serde(rename = "q6")]
    ImpairedAuditory,
    #[serde(rename = "q7")]
    ImpairedNutrition,
    #[serde(rename = "q8")]
    HistoryOfFalls,
    #[serde(rename = "q9")]
    ImpairedMobility,
    #[serde(rename = "q10")]
    AdlDependent,
    #[serde(rename = "q11")]
    MechanicalTrauma,
    #[serde(rename = "q12")]
    ExtremeAge,
    #[serde(rename = "q13")]
    FragileSkin,
    #[serde(rename = "q14")]
    PreviousSkinTear,
}

impl RiskFactor {
    pub const COUNT: usize = 14;

    /// All factors in question order.
    pub const ALL: [RiskFactor; RiskFactor::COUNT] = [
        RiskFactor::ChronicDisease,
        RiskFactor::Polypharmacy,
        RiskFactor::ImpairedCognitive,
        RiskFactor::ImpairedSensory,
        RiskFactor::ImpairedVisual,
        RiskFactor::ImpairedAuditory,
        RiskFactor::ImpairedNutrition,
        RiskFactor::HistoryOfFalls,
        RiskFactor::ImpairedMobility,
        RiskFactor::AdlDependent,
        RiskFactor::MechanicalTrauma,
        RiskFactor::ExtremeAge,
        RiskFactor::FragileSkin,
        RiskFactor::PreviousSkinTear,
    ];

    /// Factors whose presence alone forces a HIGH RISK classification.
    pub const HIGH_RISK_INDICATORS: [RiskFactor; 5] = [
        RiskFactor::ImpairedVisual,
        RiskFactor::ImpairedMobility,
        RiskFactor::AdlDependent,
        RiskFactor::ExtremeAge,
        RiskFactor::PreviousSkinTear,
    ];

    /// Zero-based position in question order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Positional key (`q1`..`q14`).
    pub fn key(self) -> &'static str {
        match self {
            RiskFactor::ChronicDisease => "q1",
            RiskFactor::Polypharmacy => "q2",
            RiskFactor::ImpairedCognitive => "q3",
            RiskFactor::ImpairedSensory => "q4",
            RiskFactor::ImpairedVisual => "q5",
            RiskFactor::ImpairedAuditory => "q6",
            RiskFactor::ImpairedNutrition => "q7",
            RiskFactor::HistoryOfFalls => "q8",
            RiskFactor::ImpairedMobility => "q9",
            RiskFactor::AdlDependent => "q10",
            RiskFactor::MechanicalTrauma => "q11",
            RiskFactor::ExtremeAge => "q12",
            RiskFactor::FragileSkin => "q13",
            RiskFactor::PreviousSkinTear => "q14",
        }
    }

    /// Field name accepted as an alias of the positional key.
    pub fn name(self) -> &'static str {
        match self {
            RiskFactor::ChronicDisease => "chronic_disease",
            RiskFactor::Polypharmacy => "polypharmacy",
            RiskFactor::ImpairedCognitive => "impaired_cognitive",
            RiskFactor::ImpairedSensory => "impaired_sensory",
            RiskFactor::ImpairedVisual => "impaired_visual",
            RiskFactor::ImpairedAuditory => "impaired_auditory",
            RiskFactor::ImpairedNutrition => "impaired_nutrition",
            RiskFactor::HistoryOfFalls => "history_falls",
            RiskFactor::ImpairedMobility => "impaired_mobility",
            RiskFactor::AdlDependent => "adl_dependent",
            RiskFactor::MechanicalTrauma => "mechanical_trauma",
            RiskFactor::ExtremeAge => "extreme_age",
            RiskFactor::FragileSkin => "fragile_skin",
            RiskFactor::PreviousSkinTear => "previous_skin_tear",
        }
    }

    /// Question label as shown on the form.
    pub fn label(self) -> &'static str {
        match self {
            RiskFactor::ChronicDisease => "Chronic/critical disease",
            RiskFactor::Polypharmacy => "Polypharmacy",
            RiskFactor::ImpairedCognitive => "Impaired cognitive",
            RiskFactor::ImpairedSensory => "Impaired sensory",
            RiskFactor::ImpairedVisual => "Impaired visual",
            RiskFactor::ImpairedAuditory => "Impaired auditory",
            RiskFactor::ImpairedNutrition => "Impaired nutrition",
            RiskFactor::HistoryOfFalls => "History of falls",
            RiskFactor::ImpairedMobility => "Impaired mobility",
            RiskFactor::AdlDependent => "ADL-dependent",
            RiskFactor::MechanicalTrauma => "Mechanical trauma",
            RiskFactor::ExtremeAge => "Extremes of age (>= 85 years old)",
            RiskFactor::FragileSkin => "Fragile skin",
            RiskFactor::PreviousSkinTear => "Previous skin tear",
        }
    }

    pub fn section(self) -> Section {
        match self {
            RiskFactor::ChronicDisease
            | RiskFactor::Polypharmacy
            | RiskFactor::ImpairedCognitive
            | RiskFactor::ImpairedSensory
            | RiskFactor::ImpairedVisual
            | RiskFactor::ImpairedAuditory
            | RiskFactor::ImpairedNutrition => Section::GeneralHealth,
            RiskFactor::HistoryOfFalls
            | RiskFactor::ImpairedMobility
            | RiskFactor::AdlDependent
            | RiskFactor::MechanicalTrauma => Section::Mobility,
            RiskFactor::ExtremeAge | RiskFactor::FragileSkin | RiskFactor::PreviousSkinTear => {
                Section::Skin
            }
        }
    }

    pub fn is_high_risk_indicator(self) -> bool {
        Self::HIGH_RISK_INDICATORS.contains(&self)
    }

    /// Look up a factor by positional key (`q5`) or field name
    /// (`impaired_visual`).
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        if let Some(number) = patterns::question_number(key) {
            return number
                .checked_sub(1)
                .and_then(|index| Self::ALL.get(index))
                .copied();
        }
        Self::ALL.iter().copied().find(|f| f.name() == key)
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Exactly one answer per risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RiskFactorSet {
    answers: [Answer; RiskFactor::COUNT],
}

impl RiskFactorSet {
    /// A set with every factor unanswered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set with every factor given the same answer.
    pub fn uniform(answer: Answer) -> Self {
        Self {
            answers: [answer; RiskFactor::COUNT],
        }
    }

    /// Build a set from loose key/answer pairs.
    ///
    /// Keys may be positional (`q5`) or field names (`impaired_visual`).
    /// A `None` or empty answer leaves the factor unanswered; factors not
    /// mentioned at all are unanswered too. Unknown keys, a factor given
    /// twice, and answers other than yes/no are rejected.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, MalformedRiskFactorSet>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::new();
        let mut seen = [false; RiskFactor::COUNT];

        for (key, value) in entries {
            let key = key.as_ref();
            let factor = RiskFactor::from_key(key)
                .ok_or_else(|| MalformedRiskFactorSet::UnknownKey(key.to_string()))?;

            if std::mem::replace(&mut seen[factor.index()], true) {
                return Err(MalformedRiskFactorSet::DuplicateKey(factor));
            }

            let answer = match value {
                Some(text) => Answer::parse(text.as_ref()).ok_or_else(|| {
                    MalformedRiskFactorSet::InvalidAnswer {
                        factor,
                        value: text.as_ref().to_string(),
                    }
                })?,
                None => Answer::Unanswered,
            };
            set.set(factor, answer);
        }

        Ok(set)
    }

    /// Builder-style setter.
    pub fn with(mut self, factor: RiskFactor, answer: Answer) -> Self {
        self.set(factor, answer);
        self
    }

    pub fn set(&mut self, factor: RiskFactor, answer: Answer) {
        self.answers[factor.index()] = answer;
    }

    pub fn get(&self, factor: RiskFactor) -> Answer {
        self.answers[factor.index()]
    }

    /// Iterate in question order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskFactor, Answer)> + '_ {
        RiskFactor::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(|a| a.is_answered())
    }

    /// Factors still unanswered, in question order.
    pub fn unanswered(&self) -> Vec<RiskFactor> {
        self.iter()
            .filter(|(_, a)| !a.is_answered())
            .map(|(f, _)| f)
            .collect()
    }

    /// Overlay every answered factor of `other` onto this set.
    pub fn merge(&mut self, other: &RiskFactorSet) {
        for (factor, answer) in other.iter() {
            if answer.is_answered() {
                self.set(factor, answer);
            }
        }
    }

    /// Give every unanswered factor the same answer.
    pub fn fill_unanswered(&mut self, answer: Answer) {
        for slot in self.answers.iter_mut().filter(|a| !a.is_answered()) {
            *slot = answer;
        }
    }

    /// The answers as booleans, or `None` while any factor is unanswered.
    pub fn completed(&self) -> Option<CompletedAnswers> {
        let mut flags = [false; RiskFactor::COUNT];
        for (slot, answer) in flags.iter_mut().zip(self.answers.iter()) {
            *slot = answer.as_bool()?;
        }
        Some(CompletedAnswers { flags })
    }
}

impl Serialize for RiskFactorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(RiskFactor::COUNT))?;
        for (factor, answer) in self.iter() {
            map.serialize_entry(factor.key(), &answer)?;
        }
        map.end()
    }
}

/// A fully answered set, reduced to one boolean per factor.
///
/// Only obtainable from a complete `RiskFactorSet`, which makes the
/// classifier total over its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletedAnswers {
    flags: [bool; RiskFactor::COUNT],
}

impl CompletedAnswers {
    pub fn is_present(&self, factor: RiskFactor) -> bool {
        self.flags[factor.index()]
    }

    /// Factors answered Yes, in question order.
    pub fn positives(&self) -> impl Iterator<Item = RiskFactor> + '_ {
        RiskFactor::ALL
            .iter()
            .copied()
            .filter(move |&f| self.is_present(f))
    }

    /// Number of factors answered Yes.
    pub fn total_risks(&self) -> usize {
        self.flags.iter().filter(|&&present| present).count()
    }
}
