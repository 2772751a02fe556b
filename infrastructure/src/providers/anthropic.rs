//! Anthropic messages API client
//!
//! Speaks `POST {base_url}/v1/messages` with `x-api-key` and
//! `anthropic-version` headers.

use super::ProviderSettings;
use super::http::{decode, post_json};
use async_trait::async_trait;
use consult_application::{Completion, ProviderClient, ProviderError, SynthesisBackend};
use consult_domain::{PromptTemplate, ProviderId};
use serde::{Deserialize, Serialize};

const MESSAGES_PATH: &str = "/v1/messages";

/// The messages API requires `max_tokens`
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

// ==================== Wire Types ====================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: Option<u64>,
    #[serde(default)]
    output_tokens: Option<u64>,
}

impl Usage {
    /// Sum of both counts; `None` when neither is reported or the sum overflows.
    fn total(&self) -> Option<u64> {
        match (self.input_tokens, self.output_tokens) {
            (None, None) => None,
            (input, output) => input.unwrap_or(0).checked_add(output.unwrap_or(0)),
        }
    }
}

/// Parse a messages body into a [`Completion`].
///
/// All `text` blocks are concatenated; other block types are skipped.
pub fn parse_messages_response(body: &str) -> Result<Completion, ProviderError> {
    let response: MessagesResponse = decode(body)?;
    if response.content.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "no content blocks in response".to_string(),
        ));
    }

    let text = response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    Ok(Completion::new(text).with_reported_tokens(response.usage.and_then(|u| u.total())))
}

// ==================== Client ====================

pub struct AnthropicClient {
    settings: ProviderSettings,
    http: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(settings: ProviderSettings, http: reqwest::Client) -> Self {
        Self { settings, http }
    }

    async fn message(&self, system: Option<&str>, user: &str) -> Result<Completion, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential(self.settings.api_key_source.clone()))?;

        let request = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        let builder = self
            .http
            .post(self.settings.endpoint(MESSAGES_PATH))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.settings.api_version);

        let body = post_json(&self.settings.id, builder, &request).await?;
        parse_messages_response(&body)
    }
}

#[async_trait]
impl ProviderClient for AnthropicClient {
    fn identity(&self) -> &ProviderId {
        &self.settings.id
    }

    async fn send(&self, question: &str) -> Result<Completion, ProviderError> {
        let prompt = PromptTemplate::answer_query(&self.settings.prompt_prefix, question);
        self.message(self.settings.system_prompt.as_deref(), &prompt)
            .await
    }
}

#[async_trait]
impl SynthesisBackend for AnthropicClient {
    fn identity(&self) -> &ProviderId {
        &self.settings.id
    }

    async fn synthesize(&self, system_prompt: &str, prompt: &str) -> Result<String, ProviderError> {
        self.message(Some(system_prompt), prompt)
            .await
            .map(|completion| completion.text)
    }
}
