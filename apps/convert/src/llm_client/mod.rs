/// LLM Client — the single point of entry for all chat-completion calls in convert.
///
/// One operation: `complete(prompt)` sends the prompt as the sole `user` message
/// and returns the text of choice 0. A call makes exactly one HTTP attempt
/// unless `CompletionConfig::max_retries` is raised above zero.
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error, trace, warn};

pub mod models;

use models::{ChatRequest, ChatResponse};

/// Production endpoint. Not configurable from the CLI or environment.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";
/// Half of the provider's stated 8000-token ceiling.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const MAX_TOKENS_CEILING: u32 = 8000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chat API returned status {status} with body {body}")]
    Api { status: u16, body: String },

    #[error("chat API returned no choices")]
    NoChoices,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid completion config: {0}")]
    InvalidConfig(String),
}

impl LlmError {
    /// Transport failures, rate limiting and server errors. Only consulted when
    /// retries are enabled.
    fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(_) => true,
            LlmError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            _ => false,
        }
    }
}

/// Model and sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    /// Extra attempts after a transient failure. 0 keeps the single-attempt contract.
    pub max_retries: u32,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.7,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
            max_retries: 0,
        }
    }
}

impl CompletionConfig {
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::InvalidConfig("model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::InvalidConfig(format!(
                "temperature {} is outside [0, 2]",
                self.temperature
            )));
        }
        if self.max_tokens == 0 || self.max_tokens > MAX_TOKENS_CEILING {
            return Err(LlmError::InvalidConfig(format!(
                "max_tokens {} must be in 1..={MAX_TOKENS_CEILING}",
                self.max_tokens
            )));
        }
        for (name, value) in [
            ("presence_penalty", self.presence_penalty),
            ("frequency_penalty", self.frequency_penalty),
        ] {
            if !(-2.0..=2.0).contains(&value) {
                return Err(LlmError::InvalidConfig(format!(
                    "{name} {value} is outside [-2, 2]"
                )));
            }
        }
        Ok(())
    }
}

/// Anything that can turn a prompt into a completion.
/// The pipeline depends on this rather than on `LlmClient` directly.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Wraps the chat-completions API. Cheap to clone; the underlying
/// `reqwest::Client` is shared and holds no per-call state.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    config: CompletionConfig,
}

impl LlmClient {
    pub fn new(api_key: String, config: CompletionConfig) -> Result<Self, LlmError> {
        Self::with_endpoint(api_key, config, OPENAI_CHAT_URL)
    }

    pub(crate) fn with_endpoint(
        api_key: String,
        config: CompletionConfig,
        endpoint: impl Into<String>,
    ) -> Result<Self, LlmError> {
        config.validate()?;
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            endpoint: endpoint.into(),
            config,
        })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Makes one full exchange, returning the parsed response.
    /// Retries transient failures with exponential backoff only when enabled.
    pub async fn call(&self, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest::single_user(&self.config, prompt);
        let body = serde_json::to_string(&request_body)?;
        debug!(
            "Chat request: model={}, prompt_chars={}",
            self.config.model,
            prompt.chars().count()
        );
        trace!("Chat request body: {body}");

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Err(e) if attempt < self.config.max_retries && e.is_transient() => {
                    // Exponential backoff: 1s, 2s, 4s, ...
                    let delay = std::time::Duration::from_millis(1000 * (1 << attempt.min(16)));
                    attempt += 1;
                    warn!(
                        "Chat call attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    async fn send_once(&self, body: &str) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .body(body.to_owned())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            error!("Chat API returned status {} with body {}", status.as_u16(), text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        trace!("Chat response body: {text}");
        let chat_response: ChatResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "Chat call succeeded: prompt_tokens={:?}, completion_tokens={:?}, total_tokens={:?}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl Completer for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        if let (None, Some(detail)) = (response.choices.first(), &response.error) {
            warn!(
                "Chat API reported an error with no choices: {:?} ({:?})",
                detail.message, detail.error_type
            );
        }
        response
            .first_content()
            .map(str::to_owned)
            .ok_or(LlmError::NoChoices)
    }
}
