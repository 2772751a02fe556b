//! OpenAI-compatible chat completions client
//!
//! Speaks `POST {base_url}/v1/chat/completions` with bearer authentication.
//! Also used for compatible endpoints such as xAI.

use super::ProviderSettings;
use super::http::{decode, post_json};
use async_trait::async_trait;
use consult_application::{Completion, ProviderClient, ProviderError, SynthesisBackend};
use consult_domain::{PromptTemplate, ProviderId};
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

// ==================== Wire Types ====================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: Option<u64>,
}

/// Parse a chat completions body into a [`Completion`].
///
/// The first choice must carry non-empty text; `usage.total_tokens` is
/// passed through when present.
pub fn parse_chat_response(body: &str) -> Result<Completion, ProviderError> {
    let response: ChatResponse = decode(body)?;
    let text = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("no choices in response".to_string()))?
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or(ProviderError::EmptyResponse)?;

    Ok(Completion::new(text).with_reported_tokens(response.usage.and_then(|u| u.total_tokens)))
}

// ==================== Client ====================

pub struct OpenAiClient {
    settings: ProviderSettings,
    http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(settings: ProviderSettings, http: reqwest::Client) -> Self {
        Self { settings, http }
    }

    async fn chat(&self, system: Option<&str>, user: &str) -> Result<Completion, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential(self.settings.api_key_source.clone()))?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: user,
        });

        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            max_tokens: self.settings.max_tokens,
        };

        let builder = self
            .http
            .post(self.settings.endpoint(CHAT_COMPLETIONS_PATH))
            .bearer_auth(api_key);

        let body = post_json(&self.settings.id, builder, &request).await?;
        parse_chat_response(&body)
    }
}

#[async_trait]
impl ProviderClient for OpenAiClient {
    fn identity(&self) -> &ProviderId {
        &self.settings.id
    }

    async fn send(&self, question: &str) -> Result<Completion, ProviderError> {
        let prompt = PromptTemplate::answer_query(&self.settings.prompt_prefix, question);
        self.chat(self.settings.system_prompt.as_deref(), &prompt)
            .await
    }
}

#[async_trait]
impl SynthesisBackend for OpenAiClient {
    fn identity(&self) -> &ProviderId {
        &self.settings.id
    }

    async fn synthesize(&self, system_prompt: &str, prompt: &str) -> Result<String, ProviderError> {
        self.chat(Some(system_prompt), prompt)
            .await
            .map(|completion| completion.text)
    }
}
