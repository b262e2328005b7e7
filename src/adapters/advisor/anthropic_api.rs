//! Anthropic API advisor implementation.
//!
//! Sends the episode transcript to the Anthropic Messages API and reads a
//! numeric score out of the reply text.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use super::errors::AdvisorApiError;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AdvisorConfig;
use crate::domain::ports::Advisor;

const API_VERSION: &str = "2023-06-01";

/// System prompt sent with every transcript.
pub const ADVISOR_SYSTEM_PROMPT: &str = "You review episodes of a robot end effector \
probing a soft medium for an embedded object and extracting it. The transcript lists \
position, velocity and contact force for every step. Judge how well the episode went: \
steady descent, gentle contact, then a smooth backward and upward withdrawal with \
little sideways (Y) motion. Reply with a single number from 0 to 10 and nothing else.";

/// Configuration for the Anthropic API advisor.
#[derive(Debug, Clone)]
pub struct AnthropicAdvisorConfig {
    /// API key, already resolved against ANTHROPIC_API_KEY.
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Max tokens to generate.
    pub max_tokens: u32,
}

impl Default for AnthropicAdvisorConfig {
    fn default() -> Self {
        Self::from(&AdvisorConfig::default())
    }
}

impl From<&AdvisorConfig> for AnthropicAdvisorConfig {
    fn from(config: &AdvisorConfig) -> Self {
        Self {
            api_key: config.resolved_api_key(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            max_tokens: config.max_tokens,
        }
    }
}

impl AnthropicAdvisorConfig {
    /// Create config with explicit API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Create config pointing at another endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

/// Request to the Anthropic Messages API.
#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: &'static str,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

/// Content block in a reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Response from the Anthropic Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

impl MessagesResponse {
    /// Concatenated text of all text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Every decimal number in `text`, in order.
///
/// A `-` counts as a sign only when it does not follow a letter or digit, so
/// ranges like `0-10` read as two positive numbers.
fn numbers(text: &str) -> Vec<f64> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let mut start = i;
        if start > 0
            && bytes[start - 1] == b'-'
            && (start < 2 || !bytes[start - 2].is_ascii_alphanumeric())
        {
            start -= 1;
        }
        let mut end = i;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
        if let Ok(value) = text[start..end].parse() {
            found.push(value);
        }
        i = end;
    }
    found
}

/// Read the score out of a reply.
///
/// The reply must contain exactly one number; anything else is ambiguous
/// and yields `None`.
pub fn parse_score(text: &str) -> Option<f64> {
    match numbers(text).as_slice() {
        [score] => Some(*score),
        _ => None,
    }
}

/// Advisor backed by the Anthropic Messages API.
pub struct AnthropicApiAdvisor {
    config: AnthropicAdvisorConfig,
    client: Client,
}

impl AnthropicApiAdvisor {
    /// Create a new Anthropic API advisor.
    pub fn new(config: AnthropicAdvisorConfig) -> DomainResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DomainError::ValidationFailed(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }

    /// Create from the advisor section of the configuration.
    pub fn from_config(config: &AdvisorConfig) -> DomainResult<Self> {
        Self::new(AnthropicAdvisorConfig::from(config))
    }

    /// Build the Messages API request for a transcript.
    fn build_request(&self, transcript: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            system: ADVISOR_SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: transcript.to_string(),
            }],
            temperature: 0.0,
        }
    }

    async fn send(&self, transcript: &str) -> Result<f64, AdvisorApiError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AdvisorApiError::MissingApiKey)?;

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.build_request(transcript))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorApiError::from_status(status, body));
        }

        let reply: MessagesResponse = response.json().await?;
        let text = reply.text();
        debug!(message_id = %reply.id, stop_reason = ?reply.stop_reason, reply = %text, "advisor replied");

        parse_score(&text).ok_or_else(|| AdvisorApiError::NoScore(text))
    }
}

#[async_trait]
impl Advisor for AnthropicApiAdvisor {
    fn name(&self) -> &'static str {
        "anthropic_api"
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn score(&self, transcript: &str) -> DomainResult<f64> {
        Ok(self.send(transcript).await?)
    }
}
