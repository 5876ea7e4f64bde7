use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Gemini API key. When absent the AI path is disabled and every
    /// enrichment falls back to the deterministic rubric.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    /// Bounded wait for a single generateContent call, in seconds.
    pub gemini_timeout_secs: f64,
    pub company_lookup_url: Option<String>,
    pub company_lookup_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("GEMINI_BASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_timeout_secs: std::env::var("GEMINI_TIMEOUT")
                .unwrap_or_else(|_| "8.0".to_string())
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("GEMINI_TIMEOUT must be a number of seconds"))
                .and_then(|secs| {
                    if secs <= 0.0 || !secs.is_finite() {
                        anyhow::bail!("GEMINI_TIMEOUT must be a positive number of seconds");
                    }
                    Ok(secs)
                })?,
            company_lookup_url: std::env::var("COMPANY_LOOKUP_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("COMPANY_LOOKUP_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })
                .transpose()?,
            company_lookup_api_key: std::env::var("COMPANY_LOOKUP_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Gemini Base URL: {}", config.gemini_base_url);
        tracing::debug!("Gemini timeout: {}s", config.gemini_timeout_secs);
        if config.gemini_api_key.is_some() {
            tracing::info!("Gemini API key configured");
        } else {
            tracing::warn!("GEMINI_API_KEY not set - AI enrichment disabled, rubric only");
        }
        if let Some(ref url) = config.company_lookup_url {
            tracing::info!("Company lookup service configured: {}", url);
        }

        Ok(config)
    }

    pub fn gemini_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.gemini_timeout_secs)
    }
}
