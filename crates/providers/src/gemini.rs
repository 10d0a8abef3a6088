//! Gemini provider implementation.
//!
//! Talks to the Generative Language API's `generateContent` endpoint:
//!
//! - `?key=` query-parameter authentication
//! - one `contents` entry with one text part per request
//! - completion text read from the first candidate's parts

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use docsage_core::TextGenerator;
use docsage_core::error::GatewayError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// A Gemini `generateContent` provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the default model and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a provider with an explicit request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Use a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = GenerateRequest {
            contents: vec![ApiContent {
                parts: vec![ApiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(
            provider = %self.name,
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending generateContent request"
        );
        let started = std::time::Instant::now();

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(e.to_string())
                } else {
                    GatewayError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(GatewayError::RateLimited { retry_after_secs: 5 });
        }

        if status == 401 || status == 403 {
            return Err(GatewayError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(GatewayError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(format!("Failed to parse response: {e}")))?;

        let text = extract_text(api_response)?;

        debug!(
            provider = %self.name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "generateContent completed"
        );
        Ok(text)
    }
}

/// Pull the completion text out of a response, trimmed.
fn extract_text(response: GenerateResponse) -> Result<String, GatewayError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GatewayError::Malformed("No candidates in response".into()))?
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(GatewayError::Malformed("Candidate contained no text".into()));
    }
    Ok(text.trim().to_string())
}

// ── Wire types ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<ApiContent>,
}

#[derive(Serialize, Deserialize, Default)]
struct ApiContent {
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Serialize, Deserialize)]
struct ApiPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
}

#[derive(Deserialize)]
struct ApiCandidate {
    #[serde(default)]
    content: ApiContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor() {
        let provider = GeminiProvider::new("test-key");
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn constructor_with_base_url_trims_trailing_slash() {
        let provider = GeminiProvider::new("test-key").with_base_url("https://proxy.example/");
        assert_eq!(provider.base_url, "https://proxy.example");
    }

    #[test]
    fn endpoint_includes_model_and_action() {
        let provider = GeminiProvider::new("test-key").with_model("gemini-pro");
        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn request_serializes_to_gemini_shape() {
        let body = GenerateRequest {
            contents: vec![ApiContent {
                parts: vec![ApiPart {
                    text: "hello".into(),
                }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn response_text_is_joined_and_trimmed() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "  Part one. "}, {"text": "Part two."}], "role": "model"}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(extract_text(response).unwrap(), "Part one. Part two.");
    }

    #[test]
    fn empty_candidates_are_malformed() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GatewayError::Malformed(_))
        ));

        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GatewayError::Malformed(_))
        ));
    }

    #[test]
    fn whitespace_only_candidate_is_malformed() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "   "}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GatewayError::Malformed(_))
        ));
    }
}
