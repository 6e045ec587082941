//! Troubleshooting suggestions for resolution failures.
//!
//! The pipeline only sees the [`Suggester`] trait. [`OpenAiSuggester`] is a
//! minimal blocking chat-completions client; it is built from an explicit
//! [`SuggestConfig`] and [`Credentials`] pair, so nothing is read from
//! ambient state after startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::SuggestConfig;
use crate::http::{self, HttpOptions};

/// Produces a human-readable hint for an error description.
pub trait Suggester {
    fn suggest(&self, error_description: &str) -> Result<String>;
}

/// API credentials for the suggestion service.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub organization: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("organization", &self.organization)
            .finish()
    }
}

impl Credentials {
    /// Reads `OPENAI_API_KEY` and optional `OPEN_AI_ORGANIZATION`, after
    /// loading a `.env` file if one is present. Returns `None` without a key.
    pub fn from_env() -> Option<Self> {
        let _ = dotenvy::dotenv();
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let organization = std::env::var("OPEN_AI_ORGANIZATION")
            .ok()
            .filter(|o| !o.trim().is_empty());
        Some(Self {
            api_key,
            organization,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    n: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Prompt sent for one error description.
pub fn build_prompt(error_description: &str) -> String {
    format!(
        "An error occurred in my Rust program: {}. Please provide a brief summary and a couple of possible solutions.",
        error_description
    )
}

/// Chat-completions backed suggester.
#[derive(Debug, Clone)]
pub struct OpenAiSuggester {
    config: SuggestConfig,
    credentials: Credentials,
    http: HttpOptions,
}

impl OpenAiSuggester {
    pub fn new(config: SuggestConfig, credentials: Credentials, http: HttpOptions) -> Self {
        Self {
            config,
            credentials,
            http,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

impl Suggester for OpenAiSuggester {
    fn suggest(&self, error_description: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(error_description),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            n: 1,
        };
        let body = serde_json::to_vec(&request).context("serialize chat request")?;

        let auth = format!("Bearer {}", self.credentials.api_key);
        let mut headers = vec![("Authorization", auth.as_str())];
        if let Some(org) = self.credentials.organization.as_deref() {
            headers.push(("OpenAI-Organization", org));
        }

        let resp = http::post_json(&self.endpoint(), &headers, &body, &self.http)?;
        if !resp.is_ok() {
            anyhow::bail!("suggestion API returned HTTP {}: {}", resp.status, resp.text());
        }
        parse_chat_response(&resp.body)
    }
}

/// First choice's content, trimmed.
fn parse_chat_response(body: &[u8]) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_slice(body).context("parse suggestion API response")?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .context("suggestion API returned no choices")
}
