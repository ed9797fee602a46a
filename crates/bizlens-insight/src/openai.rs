//! Chat-completions client for OpenAI-compatible APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::InsightError;
use crate::generator::TextGenerator;

/// Sampling temperature for insight replies.
const TEMPERATURE: f64 = 0.7;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Minimal chat-completions client. Only the one endpoint the insight
/// generator needs; pointed at a mock server in tests via
/// [`OpenAiClient::with_base_url`].
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl OpenAiClient {
    /// Creates a client for the production OpenAI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, InsightError> {
        Self::with_base_url(api_key, model, timeout_secs, user_agent, "https://api.openai.com/v1")
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InsightError::Generation`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| InsightError::Generation(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    /// Sends one chat-completion request and returns the first choice's
    /// content.
    ///
    /// # Errors
    ///
    /// - [`InsightError::Http`] on network failure or non-2xx HTTP status.
    /// - [`InsightError::Generation`] if the response carries no choices or
    ///   the base URL cannot address the endpoint.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, InsightError> {
        let url = self.endpoint()?;
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| InsightError::Generation("response carried no choices".to_owned()))
    }

    fn endpoint(&self) -> Result<Url, InsightError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                InsightError::Generation(format!("base URL cannot be extended: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["chat", "completions"]);
        Ok(url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, InsightError> {
        self.chat(system, user, max_tokens).await
    }
}
