/// Property-based tests using proptest
/// Tests invariants and properties that should hold for all inputs
use leadboost_api::enrichment::reconcile;
use leadboost_api::models::{LeadInput, LeadStatus, ScoreSource};
use leadboost_api::parser::parse_scoring;
use leadboost_api::scoring::compute_base_score_detailed;
use proptest::prelude::*;

fn arbitrary_lead(
    name: Option<String>,
    title: Option<String>,
    industry: Option<String>,
    revenue: Option<String>,
    signals: Option<String>,
    email: Option<String>,
    linkedin: Option<String>,
) -> leadboost_api::models::Lead {
    LeadInput {
        name,
        company: None,
        linkedin,
        email,
        title,
        industry,
        revenue,
        recent_signals: signals,
    }
    .normalize()
}

// Property: the rubric scorer is total and bounded
proptest! {
    #[test]
    fn base_score_never_panics_and_stays_in_bounds(
        name in proptest::option::of("\\PC*"),
        title in proptest::option::of("\\PC*"),
        industry in proptest::option::of("\\PC*"),
        revenue in proptest::option::of("\\PC*"),
        signals in proptest::option::of("\\PC*"),
        email in proptest::option::of("\\PC*"),
        linkedin in proptest::option::of("\\PC*"),
    ) {
        let lead = arbitrary_lead(name, title, industry, revenue, signals, email, linkedin);
        let (score, breakdown) = compute_base_score_detailed(&lead);
        prop_assert!(score <= 100);
        prop_assert!(breakdown.seniority <= 30);
        prop_assert!(breakdown.company_fit <= 25);
        prop_assert!(breakdown.intent <= 25);
        prop_assert!(breakdown.contact <= 10);
        prop_assert!(breakdown.recency <= 8);
    }

    #[test]
    fn base_score_is_deterministic(
        title in proptest::option::of("\\PC*"),
        revenue in proptest::option::of("\\PC*"),
        signals in proptest::option::of("\\PC*"),
    ) {
        let lead = arbitrary_lead(None, title, None, revenue, signals, None, None);
        let first = compute_base_score_detailed(&lead);
        let second = compute_base_score_detailed(&lead);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn revenue_digits_drive_company_fit(revenue in "[0-9]{1,12}") {
        let lead = arbitrary_lead(None, None, None, Some(revenue.clone()), None, None, None);
        let (_, breakdown) = compute_base_score_detailed(&lead);
        let magnitude: u64 = revenue.parse().unwrap();
        let expected = if magnitude > 100_000_000 {
            25
        } else if magnitude > 5_000_000 {
            15
        } else {
            5
        };
        prop_assert_eq!(breakdown.company_fit, expected);
    }
}

// Property: the parser never panics and never invents a score
proptest! {
    #[test]
    fn parser_never_panics(raw in "\\PC*") {
        let _ = parse_scoring(&raw);
    }

    #[test]
    fn parser_score_is_absent_for_non_json(raw in "[a-zA-Z ]{0,64}") {
        // Plain prose (no braces, no fences) can never decode to an object
        prop_assume!(!raw.contains('{'));
        let scoring = parse_scoring(&raw);
        prop_assert!(scoring.priority_score().is_none());
    }
}

// Property: status is a pure function of the score with coherent bands
proptest! {
    #[test]
    fn status_bands_are_coherent(score in 0u8..=100u8) {
        let status = LeadStatus::for_score(score);
        if score > 85 {
            prop_assert_eq!(status, LeadStatus::HotLead);
        } else if score > 75 {
            prop_assert_eq!(status, LeadStatus::High);
        } else {
            prop_assert_eq!(status, LeadStatus::Medium);
        }
    }
}

// Property: reconciliation invariants
proptest! {
    #[test]
    fn reconciled_score_always_in_bounds(base in 0u8..=100u8, ai in proptest::option::of(-500i64..=500i64)) {
        let scoring = match ai {
            Some(value) => serde_json::from_value(serde_json::json!({"priorityScore": value})).unwrap(),
            None => Default::default(),
        };
        let reconciled = reconcile(base, &scoring);
        prop_assert!(reconciled.priority_score <= 100);
        // source is "ai" exactly when an AI score is present
        match reconciled.source {
            ScoreSource::Ai => prop_assert!(reconciled.ai_score.is_some()),
            ScoreSource::Base => {
                prop_assert!(reconciled.ai_score.is_none());
                prop_assert_eq!(reconciled.priority_score, base);
            }
        }
    }
}
