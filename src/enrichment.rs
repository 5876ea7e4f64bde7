//! Lead enrichment orchestrator.
//!
//! One entry point, [`enrich_lead`], with two terminal outcomes per request:
//! AI-SCORED or BASE-SCORED. The rubric score is computed unconditionally; the
//! AI call runs under a bounded wait and every provider failure degrades to
//! the deterministic path instead of propagating. Reconciliation between the
//! two scores is a pure function, not exception control flow.

use crate::config::DEFAULT_GEMINI_MODEL;
use crate::handlers::AppState;
use crate::models::{
    CompanyProfile, EnrichedLead, Lead, LeadInput, LeadStatus, ScoreSource, ScoringResult,
};
use crate::parser::parse_scoring;
use crate::scoring::compute_base_score_detailed;
use std::time::Instant;

const UNKNOWN_SENTINEL: &str = "Unknown";
const NO_INSIGHT_SENTINEL: &str = "No insight available";
const RUBRIC_INSIGHT_SENTINEL: &str = "Rubric-based enrichment used (AI unavailable)";

/// Scoring temperature is kept low for more consistent numeric output.
const SCORING_TEMPERATURE: f64 = 0.3;

/// Outcome of reconciling the rubric score with the AI score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub priority_score: u8,
    pub ai_score: Option<u8>,
    pub source: ScoreSource,
}

fn clamp_score(score: i64) -> u8 {
    score.clamp(0, 100) as u8
}

/// Pure reconciliation policy: a valid AI score wins, otherwise the rubric
/// score stands.
pub fn reconcile(base_score: u8, scoring: &ScoringResult) -> Reconciled {
    match scoring.priority_score() {
        Some(raw) => {
            let ai_score = clamp_score(raw);
            Reconciled {
                priority_score: ai_score,
                ai_score: Some(ai_score),
                source: ScoreSource::Ai,
            }
        }
        None => Reconciled {
            priority_score: base_score,
            ai_score: None,
            source: ScoreSource::Base,
        },
    }
}

/// Build the natural-language scoring prompt for a lead.
pub fn build_scoring_prompt(lead: &Lead) -> String {
    format!(
        "Analyze this lead and return JSON with priorityScore (0-100), aiInsight, \
         isHotLead (true/false), industry and revenue. Lead:\n\
         Name: {}\n\
         Company: {}\n\
         LinkedIn: {}\n\
         Email: {}\n",
        lead.name,
        lead.company,
        lead.linkedin.as_deref().unwrap_or(""),
        lead.email,
    )
}

/// Enrich a lead. Never fails: AI and company-lookup problems degrade to the
/// deterministic rubric path.
pub async fn enrich_lead(state: &AppState, input: LeadInput) -> EnrichedLead {
    let lead = input.normalize();
    let (base_score, base_breakdown) = compute_base_score_detailed(&lead);

    tracing::info!(
        "Enriching lead '{}' at '{}' (base_score: {})",
        lead.name,
        lead.company,
        base_score
    );

    if let Some(gemini) = &state.gemini {
        // AI path: bounded call, parse, reconcile.
        let prompt = build_scoring_prompt(&lead);
        let started = Instant::now();
        let text = match tokio::time::timeout(
            state.config.gemini_timeout(),
            gemini.generate_content(DEFAULT_GEMINI_MODEL, &prompt, None, SCORING_TEMPERATURE),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!("Gemini enrichment failed: {} - falling back to rubric", e);
                "{}".to_string()
            }
            // The in-flight future is dropped here; the underlying network
            // call may still run on the provider side but its result is
            // discarded.
            Err(_) => {
                tracing::warn!(
                    "Gemini enrichment timed out after {}s - falling back to rubric",
                    state.config.gemini_timeout_secs
                );
                "{}".to_string()
            }
        };
        let ai_call_ms = started.elapsed().as_millis() as u64;

        let scoring = parse_scoring(&text);
        let reconciled = reconcile(base_score, &scoring);

        tracing::info!(
            "Lead '{}' scored {} via {:?} in {}ms",
            lead.name,
            reconciled.priority_score,
            reconciled.source,
            ai_call_ms
        );

        let industry = scoring
            .industry
            .clone()
            .or_else(|| lead.industry.clone())
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string());
        let revenue = scoring
            .revenue
            .clone()
            .or_else(|| lead.revenue.clone())
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string());
        let ai_insight = scoring
            .ai_insight
            .clone()
            .unwrap_or_else(|| NO_INSIGHT_SENTINEL.to_string());
        let is_hot_lead = scoring.is_hot_lead.unwrap_or(false) || reconciled.priority_score > 85;

        assemble(
            lead,
            base_score,
            base_breakdown,
            reconciled,
            industry,
            revenue,
            ai_insight,
            is_hot_lead,
            Some(ai_call_ms),
            scoring.confidence,
        )
    } else {
        // Deterministic path: optionally fill industry/revenue via the
        // company-lookup collaborator, best-effort.
        let profile = if lead.industry.is_none() || lead.revenue.is_none() {
            lookup_company(state, &lead.company).await
        } else {
            None
        };
        let profile = profile.unwrap_or_default();

        let industry = lead
            .industry
            .clone()
            .or(profile.industry)
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string());
        let revenue = lead
            .revenue
            .clone()
            .or(profile.revenue)
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string());

        let reconciled = Reconciled {
            priority_score: base_score,
            ai_score: None,
            source: ScoreSource::Base,
        };
        let is_hot_lead = base_score > 85;

        assemble(
            lead,
            base_score,
            base_breakdown,
            reconciled,
            industry,
            revenue,
            RUBRIC_INSIGHT_SENTINEL.to_string(),
            is_hot_lead,
            None,
            None,
        )
    }
}

/// Best-effort company lookup with memoization. `None` is cached as well so a
/// known-missing company is not re-queried within the cache TTL.
async fn lookup_company(state: &AppState, company: &str) -> Option<CompanyProfile> {
    let service = state.company_lookup.as_ref()?;
    let cache_key = company.to_lowercase();

    if let Some(cached) = state.company_cache.get(&cache_key).await {
        tracing::debug!("Company cache HIT for '{}'", company);
        return cached;
    }

    let profile = match service.lookup(company).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::warn!("Company lookup failed for '{}': {} (ignored)", company, e);
            None
        }
    };

    state.company_cache.insert(cache_key, profile.clone()).await;
    profile
}

#[allow(clippy::too_many_arguments)]
fn assemble(
    lead: Lead,
    base_score: u8,
    base_breakdown: crate::models::ScoreBreakdown,
    reconciled: Reconciled,
    industry: String,
    revenue: String,
    ai_insight: String,
    is_hot_lead: bool,
    ai_call_ms: Option<u64>,
    ai_confidence: Option<f64>,
) -> EnrichedLead {
    EnrichedLead {
        name: lead.name,
        company: lead.company,
        linkedin: lead.linkedin.unwrap_or_default(),
        email: lead.email,
        title: lead.title,
        industry,
        revenue,
        recent_signals: lead.recent_signals,
        base_score,
        base_breakdown,
        ai_score: reconciled.ai_score,
        priority_score: reconciled.priority_score,
        score_source: reconciled.source,
        status: LeadStatus::for_score(reconciled.priority_score),
        ai_insight,
        is_hot_lead,
        ai_call_ms,
        ai_confidence,
    }
}
