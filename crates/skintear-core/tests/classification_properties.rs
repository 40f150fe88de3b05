use chrono::NaiveDate;
use proptest::prelude::*;
use skintear_core::{
    assess, classify, validate, Answer, RiskCategory, RiskFactor, RiskFactorSet, Submission,
    ValidationError,
};

fn answered() -> impl Strategy<Value = Answer> {
    prop_oneof![Just(Answer::Yes), Just(Answer::No)]
}

fn any_answer() -> impl Strategy<Value = Answer> {
    prop_oneof![Just(Answer::Yes), Just(Answer::No), Just(Answer::Unanswered)]
}

fn complete_set() -> impl Strategy<Value = RiskFactorSet> {
    prop::array::uniform14(answered()).prop_map(set_from)
}

fn set_from(answers: [Answer; 14]) -> RiskFactorSet {
    RiskFactor::ALL
        .iter()
        .zip(answers)
        .fold(RiskFactorSet::new(), |set, (&f, a)| set.with(f, a))
}

fn ordinary_factors() -> Vec<RiskFactor> {
    RiskFactor::ALL
        .iter()
        .copied()
        .filter(|f| !f.is_high_risk_indicator())
        .collect()
}

fn category_of(set: &RiskFactorSet) -> RiskCategory {
    classify(&validate("CASE", set).unwrap())
}

proptest! {
    #[test]
    fn single_indicator_is_high_risk(index in 0usize..5) {
        let factor = RiskFactor::HIGH_RISK_INDICATORS[index];
        let set = RiskFactorSet::uniform(Answer::No).with(factor, Answer::Yes);
        prop_assert_eq!(category_of(&set), RiskCategory::HighRisk);
    }

    #[test]
    fn ordinary_factors_only_is_at_risk(mask in 1u16..(1 << 9)) {
        let set = ordinary_factors()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .fold(RiskFactorSet::uniform(Answer::No), |set, (_, f)| set.with(f, Answer::Yes));
        prop_assert_eq!(category_of(&set), RiskCategory::AtRisk);
    }

    #[test]
    fn any_indicator_forces_high_risk(set in complete_set(), index in 0usize..5) {
        let set = set.with(RiskFactor::HIGH_RISK_INDICATORS[index], Answer::Yes);
        prop_assert_eq!(category_of(&set), RiskCategory::HighRisk);
    }

    #[test]
    fn category_matches_rule(set in complete_set()) {
        let yes: Vec<RiskFactor> = set
            .iter()
            .filter(|(_, a)| *a == Answer::Yes)
            .map(|(f, _)| f)
            .collect();

        let expected = if yes.is_empty() {
            RiskCategory::NoRisk
        } else if yes.iter().any(|f| f.is_high_risk_indicator()) {
            RiskCategory::HighRisk
        } else {
            RiskCategory::AtRisk
        };

        prop_assert_eq!(category_of(&set), expected);
    }

    #[test]
    fn classification_is_order_independent(
        answers in prop::array::uniform14(answered()),
        order in Just((0..14).collect::<Vec<usize>>()).prop_shuffle(),
    ) {
        let in_order = RiskFactorSet::from_entries(
            RiskFactor::ALL.iter().zip(answers).map(|(f, a)| (f.key(), Some(a.as_str()))),
        )
        .unwrap();

        let shuffled = RiskFactorSet::from_entries(
            order.iter().map(|&i| (RiskFactor::ALL[i].key(), Some(answers[i].as_str()))),
        )
        .unwrap();

        prop_assert_eq!(in_order, shuffled);
        prop_assert_eq!(category_of(&in_order), category_of(&shuffled));
    }

    #[test]
    fn classification_is_idempotent(set in complete_set()) {
        let answers = validate("CASE", &set).unwrap();
        prop_assert_eq!(classify(&answers), classify(&answers));
    }

    #[test]
    fn unanswered_factor_blocks_validation(
        answers in prop::array::uniform14(any_answer()),
        index in 0usize..14,
    ) {
        let set = set_from(answers).with(RiskFactor::ALL[index], Answer::Unanswered);
        match validate("CASE", &set) {
            Err(ValidationError::IncompleteAnswers { unanswered }) => {
                prop_assert!(unanswered.contains(&RiskFactor::ALL[index]));
            }
            other => prop_assert!(false, "expected IncompleteAnswers, got {:?}", other),
        }
    }

    #[test]
    fn blank_case_id_is_reported_first(
        blank in "[ \t]{0,4}",
        answers in prop::array::uniform14(any_answer()),
    ) {
        prop_assert_eq!(
            validate(&blank, &set_from(answers)),
            Err(ValidationError::MissingCaseId)
        );
    }
}

#[test]
fn end_to_end_scenarios() {
    let date = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();

    let a = assess(&Submission::new("CASE001", date, RiskFactorSet::uniform(Answer::No))).unwrap();
    assert_eq!(a.risk_category, RiskCategory::NoRisk);
    assert_eq!(a.guidance.problem_list, "N.A.");

    let b = assess(&Submission::new(
        "CASE002",
        date,
        RiskFactorSet::uniform(Answer::No).with(RiskFactor::ImpairedVisual, Answer::Yes),
    ))
    .unwrap();
    assert_eq!(b.risk_category, RiskCategory::HighRisk);

    let c = assess(&Submission::new(
        "CASE003",
        date,
        RiskFactorSet::uniform(Answer::No)
            .with(RiskFactor::ChronicDisease, Answer::Yes)
            .with(RiskFactor::ImpairedCognitive, Answer::Yes),
    ))
    .unwrap();
    assert_eq!(c.risk_category, RiskCategory::AtRisk);
}
