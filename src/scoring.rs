//! Deterministic rubric scorer.
//!
//! Maps lead attributes to an integer score in [0,100] plus per-category
//! sub-scores. Total and side-effect free: missing fields contribute zero to
//! their category, and no input can make it fail.

use crate::models::{Lead, ScoreBreakdown};

const SENIORITY_EXEC: [&str; 5] = ["founder", "ceo", "cto", "cfo", "co-founder"];
const SENIORITY_VP: [&str; 4] = ["vp", "vice president", "head", "director"];
const SENIORITY_MANAGER: [&str; 2] = ["manager", "lead"];

const INDUSTRY_FIT: [&str; 4] = ["finance", "health", "technology", "saas"];

// "hiring" appears in both tiers; the strong tier is checked first so its
// match wins. Preserved as-is from the upstream rubric.
const INTENT_STRONG: [&str; 6] = ["fund", "raised", "series", "hiring", "launch", "acquired"];
const INTENT_WEAK: [&str; 4] = ["hiring", "growth", "expanding", "pilot"];

const RECENCY: [&str; 3] = ["recent", "month", "week"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Seniority (0-30): case-insensitive substring match on title, first
/// matching tier wins.
fn seniority_points(title: Option<&str>) -> u8 {
    let Some(title) = title else { return 0 };
    let title = title.to_lowercase();
    if contains_any(&title, &SENIORITY_EXEC) {
        30
    } else if contains_any(&title, &SENIORITY_VP) {
        20
    } else if contains_any(&title, &SENIORITY_MANAGER) {
        10
    } else {
        0
    }
}

/// Company fit (0-25): revenue magnitude when revenue is present, industry
/// keyword match otherwise. Zero when both are absent.
fn company_fit_points(revenue: Option<&str>, industry: Option<&str>) -> u8 {
    if let Some(revenue) = revenue {
        let digits: String = revenue.chars().filter(|c| c.is_ascii_digit()).collect();
        return match digits.parse::<u64>() {
            Ok(magnitude) if magnitude > 100_000_000 => 25,
            Ok(magnitude) if magnitude > 5_000_000 => 15,
            Ok(_) => 5,
            Err(_) => 10,
        };
    }

    match industry {
        Some(industry) if contains_any(&industry.to_lowercase(), &INDUSTRY_FIT) => 20,
        Some(_) => 10,
        None => 0,
    }
}

/// Intent signals (0-25): strong tier checked before the weak tier.
fn intent_points(signals: Option<&str>) -> u8 {
    let Some(signals) = signals else { return 0 };
    let signals = signals.to_lowercase();
    if contains_any(&signals, &INTENT_STRONG) {
        25
    } else if contains_any(&signals, &INTENT_WEAK) {
        10
    } else {
        0
    }
}

/// Contact quality (0-10): both email and linkedin present -> 10, exactly one
/// -> 5, neither -> 0. A derived email does not count as present.
fn contact_points(lead: &Lead) -> u8 {
    let has_email = !lead.email_derived;
    let has_linkedin = lead.linkedin.is_some();
    match (has_email, has_linkedin) {
        (true, true) => 10,
        (true, false) | (false, true) => 5,
        (false, false) => 0,
    }
}

/// Recency (0-8): signals mention "recent", "month", or "week".
fn recency_points(signals: Option<&str>) -> u8 {
    match signals {
        Some(signals) if contains_any(&signals.to_lowercase(), &RECENCY) => 8,
        _ => 0,
    }
}

/// Compute the rubric score with its per-category breakdown.
pub fn compute_base_score_detailed(lead: &Lead) -> (u8, ScoreBreakdown) {
    let breakdown = ScoreBreakdown {
        seniority: seniority_points(lead.title.as_deref()),
        company_fit: company_fit_points(lead.revenue.as_deref(), lead.industry.as_deref()),
        intent: intent_points(lead.recent_signals.as_deref()),
        contact: contact_points(lead),
        recency: recency_points(lead.recent_signals.as_deref()),
    };

    let sum = breakdown.seniority as u16
        + breakdown.company_fit as u16
        + breakdown.intent as u16
        + breakdown.contact as u16
        + breakdown.recency as u16;

    (sum.min(100) as u8, breakdown)
}

/// Compute the rubric score alone.
pub fn compute_base_score(lead: &Lead) -> u8 {
    compute_base_score_detailed(lead).0
}
