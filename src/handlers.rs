use crate::config::{Config, DEFAULT_GEMINI_MODEL};
use crate::errors::{AppError, ResultExt};
use crate::gemini_client::GeminiClient;
use crate::models::{CompanyProfile, EnrichedLead, GenerateRequest, LeadInput};
use crate::services::CompanyLookupService;
use axum::{extract::State, http::StatusCode, Json};
use moka::future::Cache;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Gemini client; `None` when no API key is configured.
    pub gemini: Option<GeminiClient>,
    /// Optional company-lookup collaborator for the deterministic path.
    pub company_lookup: Option<CompanyLookupService>,
    /// Company profile cache. Key: lowercased company name,
    /// Value: `Option<CompanyProfile>` (`None` means checked and not found).
    pub company_cache: Cache<String, Option<CompanyProfile>>,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /api/models
///
/// Lists Gemini models that support content generation. Unlike `/api/enrich`,
/// this endpoint is a thin passthrough: missing credentials or provider
/// failures surface as 500 with the provider's message.
pub async fn list_models(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let gemini = state.gemini.as_ref().ok_or_else(|| {
        AppError::ProviderNotConfigured("GEMINI_API_KEY not configured".to_string())
    })?;

    let models = gemini.list_models().await.context("Listing Gemini models")?;

    tracing::info!("Listed {} generation-capable models", models.len());
    Ok(Json(json!({ "models": models })))
}

/// POST /api/enrich
///
/// Enriches a lead with a priority score and insight. Maximally available:
/// always returns 200, degrading to the deterministic rubric when the AI
/// provider is unavailable, errors, or times out.
pub async fn enrich(
    State(state): State<Arc<AppState>>,
    Json(input): Json<LeadInput>,
) -> Json<EnrichedLead> {
    Json(crate::enrichment::enrich_lead(&state, input).await)
}

/// POST /api/generate
///
/// Raw text generation passthrough. 400 when `prompt` is missing, 500 when
/// the provider is not configured or the call fails.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let gemini = state.gemini.as_ref().ok_or_else(|| {
        AppError::ProviderNotConfigured("GEMINI_API_KEY not configured".to_string())
    })?;

    let prompt = request
        .prompt
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'prompt'".to_string()))?;

    let model = request.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);
    let temperature = request.temperature.unwrap_or(0.7);

    let text = gemini
        .generate_content(model, prompt, request.system.as_deref(), temperature)
        .await?;

    Ok(Json(json!({ "text": text })))
}
