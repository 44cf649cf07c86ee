//! Gemini text-generation client
//!
//! The only operation the backend needs from the model provider is
//! prompt-in, text-out; all structure is imposed by the prompts and the
//! response extraction step. The client carries a bounded timeout and
//! retries exactly once on transport failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use specforge_common::Result;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini client errors
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Response contained no generated text")]
    EmptyResponse,

    #[error("Invalid API key")]
    InvalidApiKey,
}

/// Text-generation seam consumed by every AI-backed service
///
/// Implemented by [`GeminiClient`] in production and by scripted fakes in
/// tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Gemini API client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> std::result::Result<Self, GeminiError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model,
        })
    }

    async fn generate_content(&self, prompt: &str) -> std::result::Result<String, GeminiError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Querying Gemini API");

        let response = match self.http_client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(first_err) => {
                // One retry on transport failure; HTTP-level errors are not retried
                tracing::warn!("Gemini request failed ({}), retrying once", first_err);
                self.http_client
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(|e| GeminiError::NetworkError(e.to_string()))?
            }
        };

        let status = response.status();

        if status == 401 || status == 403 {
            return Err(GeminiError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiError(status.as_u16(), error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::ParseError(e.to_string()))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(GeminiError::EmptyResponse)?;

        tracing::debug!(response_chars = text.len(), "Gemini response received");

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt)
            .await
            .map_err(|e| specforge_common::Error::AiGeneration(e.to_string()))
    }
}
