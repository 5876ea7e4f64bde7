//! Extracts a structured scoring object from free-form model output.
//!
//! Models frequently wrap their JSON in markdown fences or emit malformed
//! payloads; this parser never fails outward. Anything it cannot decode
//! becomes an empty [`ScoringResult`], which downstream reconciliation treats
//! as "no structured score".

use crate::models::ScoringResult;
use regex::Regex;
use std::sync::OnceLock;

static JSON_FENCE: OnceLock<Regex> = OnceLock::new();

fn json_fence() -> &'static Regex {
    JSON_FENCE.get_or_init(|| {
        Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("fence regex is valid")
    })
}

/// Parse model output into a scoring result. Total: malformed, empty, or
/// non-JSON input yields `ScoringResult::default()`.
pub fn parse_scoring(raw_text: &str) -> ScoringResult {
    let mut text = raw_text.trim();
    if text.is_empty() {
        text = "{}";
    }

    // When a fenced JSON block is present, decode only the fenced content.
    let extracted;
    if text.contains("```json") {
        if let Some(captures) = json_fence().captures(text) {
            extracted = captures[1].to_string();
            text = extracted.trim();
        }
    }

    match serde_json::from_str::<ScoringResult>(text) {
        Ok(scoring) => scoring,
        Err(e) => {
            tracing::debug!("Could not decode model output as scoring JSON: {}", e);
            ScoringResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let scoring = parse_scoring(
            r#"{"priorityScore": 85, "aiInsight": "Strong fit", "isHotLead": true}"#,
        );
        assert_eq!(scoring.priority_score(), Some(85));
        assert_eq!(scoring.ai_insight.as_deref(), Some("Strong fit"));
        assert_eq!(scoring.is_hot_lead, Some(true));
    }

    #[test]
    fn extracts_fenced_json_block() {
        let raw = "Here is my analysis:\n```json\n{\"priorityScore\": 72, \"industry\": \"SaaS\"}\n```\nHope that helps!";
        let scoring = parse_scoring(raw);
        assert_eq!(scoring.priority_score(), Some(72));
        assert_eq!(scoring.industry.as_deref(), Some("SaaS"));
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let scoring = parse_scoring("");
        assert!(scoring.priority_score().is_none());
        assert!(scoring.ai_insight.is_none());

        let scoring = parse_scoring("   \n ");
        assert!(scoring.priority_score().is_none());
    }

    #[test]
    fn malformed_json_yields_empty_result() {
        for raw in [
            "not json at all",
            "{\"priorityScore\": ",
            "```json\n{broken\n```",
            "[1, 2, 3]",
        ] {
            let scoring = parse_scoring(raw);
            assert!(scoring.priority_score().is_none(), "input: {}", raw);
            assert!(scoring.is_hot_lead.is_none(), "input: {}", raw);
        }
    }

    #[test]
    fn truncates_float_scores() {
        let scoring = parse_scoring(r#"{"priorityScore": 88.7}"#);
        assert_eq!(scoring.priority_score(), Some(88));
    }

    #[test]
    fn non_numeric_score_treated_as_absent() {
        let scoring = parse_scoring(r#"{"priorityScore": [85], "aiInsight": "ok"}"#);
        assert!(scoring.priority_score().is_none());
        // The rest of the object still decodes.
        assert_eq!(scoring.ai_insight.as_deref(), Some("ok"));
    }
}
