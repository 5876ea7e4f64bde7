mod config;
mod enrichment;
mod errors;
mod gemini_client;
mod handlers;
mod models;
mod parser;
mod scoring;
mod services;

use axum::{
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Main entry point for the application.
///
/// Initializes logging, configuration, the optional Gemini and company-lookup
/// clients, and the HTTP routes with their middleware, then starts the Axum
/// server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadboost_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize Gemini client when credentials are present; without it every
    // enrichment uses the deterministic rubric path.
    let gemini = match config.gemini_api_key.clone() {
        Some(api_key) => {
            match gemini_client::GeminiClient::new(config.gemini_base_url.clone(), api_key) {
                Ok(client) => {
                    tracing::info!("✓ Gemini client initialized: {}", config.gemini_base_url);
                    Some(client)
                }
                Err(e) => {
                    tracing::error!("Failed to initialize Gemini client: {}", e);
                    None
                }
            }
        }
        None => None,
    };

    let company_lookup = services::CompanyLookupService::new(&config);
    if company_lookup.is_some() {
        tracing::info!("✓ Company lookup client initialized");
    }

    // Company profile cache (1 hour TTL) to avoid re-querying the lookup
    // collaborator for the same company name.
    let company_cache = Cache::builder()
        .time_to_live(Duration::from_secs(3600))
        .max_capacity(10_000)
        .build();

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        gemini,
        company_lookup,
        company_cache,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = Router::new()
        .route("/api/models", get(handlers::list_models))
        .route("/api/enrich", post(handlers::enrich))
        .route("/api/generate", post(handlers::generate))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 1MB max payload
                .layer(RequestBodyLimitLayer::new(1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/api/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
