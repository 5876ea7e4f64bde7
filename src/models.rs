use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Request Models ============

/// Raw lead payload accepted by `POST /api/enrich`.
///
/// Every field is optional so the endpoint can keep its 200-always contract;
/// defaults and derived values are applied by [`LeadInput::normalize`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadInput {
    /// Contact name.
    pub name: Option<String>,
    /// Company name.
    pub company: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin: Option<String>,
    /// Email address. Derived from name + company when absent.
    pub email: Option<String>,
    /// Job title, used for seniority scoring.
    pub title: Option<String>,
    /// Industry sector. Some upstream sources send this as "sector".
    #[serde(alias = "sector")]
    pub industry: Option<String>,
    /// Annual revenue, free text (may embed currency/unit characters).
    pub revenue: Option<String>,
    /// Free-text recent activity signals (funding, hiring, launches).
    pub recent_signals: Option<String>,
}

/// Normalized lead with defaults applied. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Lead {
    pub name: String,
    pub company: String,
    pub email: String,
    /// True when the email was synthesized from name + company rather than
    /// supplied by the caller. Synthesized addresses do not count toward
    /// contact-quality scoring.
    pub email_derived: bool,
    pub linkedin: Option<String>,
    pub title: Option<String>,
    pub industry: Option<String>,
    pub revenue: Option<String>,
    pub recent_signals: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl LeadInput {
    /// Apply defaults and derive the email address when absent.
    ///
    /// The derived address follows the upstream convention:
    /// `{name lowercased, spaces -> dots}@{company lowercased, spaces stripped}.com`.
    pub fn normalize(self) -> Lead {
        let name = non_blank(self.name).unwrap_or_else(|| "Unknown".to_string());
        let company = non_blank(self.company).unwrap_or_else(|| "Unknown Company".to_string());

        let (email, email_derived) = match non_blank(self.email) {
            Some(email) => (email, false),
            None => {
                let local = name.to_lowercase().replace(' ', ".");
                let domain = company.to_lowercase().replace(' ', "");
                (format!("{}@{}.com", local, domain), true)
            }
        };

        Lead {
            name,
            company,
            email,
            email_derived,
            linkedin: non_blank(self.linkedin),
            title: non_blank(self.title),
            industry: non_blank(self.industry),
            revenue: non_blank(self.revenue),
            recent_signals: non_blank(self.recent_signals),
        }
    }
}

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub model: Option<String>,
    /// Optional system instruction passed through to the model.
    pub system: Option<String>,
    /// Sampling temperature, defaults to 0.7.
    pub temperature: Option<f64>,
}

// ============ AI Scoring Models ============

/// Structured scoring object extracted from free-form model output.
///
/// Any field may be missing; absence is a valid state, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScoringResult {
    /// Raw `priorityScore` value as returned by the model. Models sometimes
    /// emit numbers as strings, so coercion is deferred to [`Self::priority_score`].
    #[serde(rename = "priorityScore")]
    pub priority_score_raw: Option<Value>,
    pub industry: Option<String>,
    pub revenue: Option<String>,
    #[serde(rename = "aiInsight")]
    pub ai_insight: Option<String>,
    #[serde(rename = "isHotLead")]
    pub is_hot_lead: Option<bool>,
    pub confidence: Option<f64>,
}

impl ScoringResult {
    /// Coerce the raw priority score to an integer.
    ///
    /// Accepts any JSON number, or a string parseable as a float, truncated to
    /// an integer. Anything else is treated as absent (not zero).
    pub fn priority_score(&self) -> Option<i64> {
        match self.priority_score_raw.as_ref()? {
            Value::Number(n) => n.as_f64().map(|f| f.trunc() as i64),
            Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
            _ => None,
        }
    }
}

// ============ Response Models ============

/// Priority band derived from the reconciled score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadStatus {
    #[serde(rename = "Hot Lead")]
    HotLead,
    High,
    Medium,
}

impl LeadStatus {
    /// Pure threshold mapping: >85 hot, >75 high, else medium.
    pub fn for_score(priority_score: u8) -> Self {
        if priority_score > 85 {
            LeadStatus::HotLead
        } else if priority_score > 75 {
            LeadStatus::High
        } else {
            LeadStatus::Medium
        }
    }
}

/// Which score won reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Ai,
    Base,
}

/// Per-category rubric breakdown, returned alongside the base score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub seniority: u8,
    pub company_fit: u8,
    pub intent: u8,
    pub contact: u8,
    pub recency: u8,
}

/// Final enriched lead returned by `POST /api/enrich`.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedLead {
    pub name: String,
    pub company: String,
    pub linkedin: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub industry: String,
    pub revenue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_signals: Option<String>,
    /// Rubric score. Always present regardless of AI availability.
    pub base_score: u8,
    pub base_breakdown: ScoreBreakdown,
    /// AI score, clamped to [0,100]; null when the AI produced no usable score.
    pub ai_score: Option<u8>,
    /// Reconciled score: the AI score when present, else the base score.
    pub priority_score: u8,
    pub score_source: ScoreSource,
    pub status: LeadStatus,
    pub ai_insight: String,
    pub is_hot_lead: bool,
    /// Wall-clock duration of the bounded AI call. Present only when the AI
    /// path executed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_call_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_confidence: Option<f64>,
}

/// Industry/revenue pair returned by the company-lookup collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub industry: Option<String>,
    pub revenue: Option<String>,
}
