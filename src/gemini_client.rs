use crate::errors::AppError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Client for the Gemini generative-language REST API.
///
/// Transport-level timeout is deliberately generous (30s); the enrichment
/// orchestrator imposes its own tighter bounded wait around each call.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Part {
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListModelsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelInfo {
    name: String,
    #[serde(rename = "supportedGenerationMethods")]
    supported_generation_methods: Vec<String>,
}

impl GeminiClient {
    /// Creates a new `GeminiClient`.
    pub fn new(base_url: String, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ProviderError(format!("Failed to create Gemini client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Generate text for a prompt.
    ///
    /// # Arguments
    ///
    /// * `model` - Model identifier, e.g. "gemini-2.0-flash".
    /// * `prompt` - User prompt text.
    /// * `system` - Optional system instruction.
    /// * `temperature` - Sampling temperature.
    ///
    /// # Returns
    ///
    /// * `Result<String, AppError>` - Concatenated text of the first candidate.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
        system: Option<&str>,
        temperature: f64,
    ) -> Result<String, AppError> {
        // API key goes in the query string; keep it out of logs.
        let url = reqwest::Url::parse_with_params(
            &format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, model
            ),
            &[("key", self.api_key.as_str())],
        )
        .map_err(|e| AppError::ProviderError(format!("Failed to build URL: {}", e)))?;

        tracing::debug!(
            "POST {}/v1beta/models/{}:generateContent?key=[REDACTED]",
            self.base_url,
            model
        );

        let mut body = json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }],
            "generationConfig": {
                "temperature": temperature
            }
        });
        if let Some(system) = system {
            body["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ProviderError(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ProviderError(format!(
                "Gemini returned {}: {}",
                status, error_text
            )));
        }

        let data: GenerateContentResponse = response.json().await.map_err(|e| {
            AppError::ProviderError(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = data
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::ProviderError(
                "Gemini response contained no candidate text".to_string(),
            ));
        }

        Ok(text)
    }

    /// List the names of models that support content generation.
    pub async fn list_models(&self) -> Result<Vec<String>, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/v1beta/models", self.base_url),
            &[("key", self.api_key.as_str())],
        )
        .map_err(|e| AppError::ProviderError(format!("Failed to build URL: {}", e)))?;

        tracing::debug!("GET {}/v1beta/models?key=[REDACTED]", self.base_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::ProviderError(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ProviderError(format!(
                "Gemini returned {}: {}",
                status, error_text
            )));
        }

        let data: ListModelsResponse = response.json().await.map_err(|e| {
            AppError::ProviderError(format!("Failed to parse Gemini response: {}", e))
        })?;

        let names = data
            .models
            .into_iter()
            .filter(|model| {
                model
                    .supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|model| model.name)
            .collect();

        Ok(names)
    }
}
