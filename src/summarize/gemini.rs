use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{build_prompt, Summarizer};
use crate::Result;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Client for Google's Gemini `generateContent` API.
///
/// Constructed once at startup and injected into the handler; configuration
/// (API key, model id) is supplied by the caller.
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_api_base(DEFAULT_API_BASE, api_key, model)
    }

    /// Create a client against a non-default base URL (used by tests)
    pub fn with_api_base(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        tracing::debug!(model = %self.model, chars = transcript.chars().count(), "requesting summary");

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": build_prompt(transcript) }],
            }],
        });

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.api_base, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Gemini request failed: HTTP {}", response.status());
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Gemini response contained no candidate text"))
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, if any
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}
