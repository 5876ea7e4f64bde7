use crate::config::Config;
use crate::errors::AppError;
use crate::models::CompanyProfile;
use reqwest::Client;
use std::time::Duration;

/// Client for the optional third-party company-lookup service.
///
/// Strictly best-effort: the orchestrator only consults it on the
/// deterministic path and ignores every failure. The short timeout keeps a
/// slow collaborator from delaying the enclosing request.
pub struct CompanyLookupService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CompanyLookupService {
    pub fn new(config: &Config) -> Option<Self> {
        let base_url = config.company_lookup_url.clone()?;
        let api_key = config.company_lookup_api_key.clone()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .ok()?;

        Some(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Look up industry/revenue for a company by name.
    pub async fn lookup(&self, company_name: &str) -> Result<CompanyProfile, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/v1/companies", self.base_url),
            &[("name", company_name), ("key", self.api_key.as_str())],
        )
        .map_err(|e| AppError::ProviderError(format!("Failed to build URL: {}", e)))?;

        tracing::debug!(
            "Company lookup: {}/v1/companies?name={}&key=[REDACTED]",
            self.base_url,
            company_name
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::ProviderError(format!("Company lookup request failed: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(AppError::ProviderError(format!(
                "Company lookup returned status {}",
                response.status()
            )));
        }

        let profile: CompanyProfile = response.json().await.map_err(|e| {
            AppError::ProviderError(format!("Failed to parse company lookup response: {}", e))
        })?;

        Ok(profile)
    }
}
