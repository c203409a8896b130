//! Client for Google's generative language REST API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;
use crate::models::config::LlmConfig;

use super::ModelClient;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// `generateContent` client.
///
/// Configuration and credential are passed in explicitly at construction;
/// the client never mutates process environment state.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: LlmConfig,
}

impl GeminiClient {
    /// Create a client with an explicit credential.
    pub fn new(api_key: impl Into<String>, config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            config,
        }
    }

    /// Create a client with the credential read from `GEMINI_API_KEY`.
    pub fn from_env(config: LlmConfig) -> Result<Self, ModelError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| ModelError::MissingApiKey(API_KEY_ENV))?;
        Ok(Self::new(api_key, config))
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl ModelClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        debug!("requesting completion from {}", self.config.model);

        let response = self
            .http
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .map(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .find_map(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty())
            .ok_or(ModelError::EmptyCompletion)?;

        debug!("completion received: {} bytes", text.len());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn request_url_joins_endpoint_and_model() {
        let client = GeminiClient::new("key", LlmConfig::default());
        assert_eq!(
            client.request_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );

        let config = LlmConfig {
            endpoint: "http://localhost:8080/v1beta/".to_string(),
            model: "test-model".to_string(),
            ..LlmConfig::default()
        };
        let client = GeminiClient::new("key", config);
        assert_eq!(
            client.request_url(),
            "http://localhost:8080/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn response_parsing_joins_candidate_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed
            .candidates
            .into_iter()
            .find_map(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap();
        assert_eq!(text, "{\"a\": 1}");
    }

    #[test]
    fn missing_api_key_error_names_the_variable() {
        let err = ModelError::MissingApiKey(API_KEY_ENV);
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn request_body_serializes_camel_case_config() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: 2048,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"maxOutputTokens\":2048"));
        assert!(json.contains("\"text\":\"hello\""));
    }
}
