//! Gemini `generateContent` client
//!
//! Request:
//! ```text
//! POST {api_base}/models/{model}:generateContent
//! {"contents":[{"parts":[{"text":"..."}]}],"generationConfig":{"temperature":0.1,"maxOutputTokens":1024}}
//! ```
//! The reply text is the concatenation of the first candidate's text parts.

use crate::classifier::ClassifierClient;
use crate::config::ClassifierSettings;
use async_trait::async_trait;
use riskwatch_core::{Result, TransportError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Longest slice of an error body carried into an error message
const ERROR_BODY_CHARS: usize = 200;

/// Classifier client backed by the Gemini API
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    generation: GenerationConfig,
}

impl GeminiClient {
    /// Create a client from settings; fails if no API key is available
    pub fn new(settings: &ClassifierSettings) -> Result<Self> {
        let api_key = settings.resolve_api_key()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| riskwatch_core::Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: settings.endpoint(),
            model: settings.model.clone(),
            api_key,
            generation: GenerationConfig {
                temperature: settings.temperature,
                max_output_tokens: settings.max_output_tokens,
            },
        })
    }
}

#[async_trait]
impl ClassifierClient for GeminiClient {
    async fn classify(&self, prompt: &str) -> std::result::Result<String, TransportError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.generation.clone(),
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending classification request");

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_request_error)?;

        if !(200..300).contains(&status) {
            return Err(status_error(status, &text));
        }

        extract_reply_text(&text)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

fn map_request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::network(err.to_string())
    }
}

/// Map a non-success status and its body onto a transport error
pub(crate) fn status_error(status: u16, body: &str) -> TransportError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.chars().take(ERROR_BODY_CHARS).collect());

    match status {
        401 | 403 => TransportError::Unauthorized(message),
        429 => TransportError::QuotaExceeded(message),
        _ => TransportError::Status { status, message },
    }
}

/// Pull the reply text out of a successful response body
pub(crate) fn extract_reply_text(body: &str) -> std::result::Result<String, TransportError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| TransportError::Protocol(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(TransportError::Protocol(error.message));
    }

    let text: String = response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(TransportError::EmptyResponse)
    } else {
        Ok(text)
    }
}

// =============================================================================
// API Types
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize, Clone)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}
