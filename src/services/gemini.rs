// src/services/gemini.rs

use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const FALLBACK_UPSTREAM_ERROR: &str = "Failed to get AI response";
pub const NO_RESPONSE_GENERATED: &str = "No response generated";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    #[error("upstream returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream returned an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid upstream url: {0}")]
    Url(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(e)
        }
    }
}

/// Fixed generation parameters sent with every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
    generation: GenerationConfig,
}

impl GeminiClient {
    pub fn new(
        base_url: Url,
        model: impl Into<String>,
        generation: GenerationConfig,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Transport)?;
        Ok(Self {
            http,
            base_url,
            model: model.into(),
            generation,
        })
    }

    pub fn endpoint(&self) -> Result<Url, UpstreamError> {
        let raw = format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        );
        Url::parse(&raw).map_err(|e| UpstreamError::Url(format!("{raw}: {e}")))
    }

    /// Sends `prompt` as the single user turn and returns the first
    /// candidate's text, or the fallback text when there is none.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, UpstreamError> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: self.generation,
        };

        let res = self
            .http
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        let raw = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %raw, "upstream error body");
            return Err(UpstreamError::Status {
                status,
                message: extract_error_message(&raw),
            });
        }

        extract_candidate_text(&raw)
    }
}

/// Best-effort `error.message` from an upstream error body.
pub fn extract_error_message(raw: &str) -> String {
    serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| FALLBACK_UPSTREAM_ERROR.to_string())
}

pub fn extract_candidate_text(raw: &str) -> Result<String, UpstreamError> {
    let parsed: GenerateContentResponse = serde_json::from_str(raw)?;
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text);
    Ok(text.unwrap_or_else(|| NO_RESPONSE_GENERATED.to_string()))
}
