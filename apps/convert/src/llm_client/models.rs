//! Wire model for the OpenAI chat-completions API.
//!
//! Every value here lives for a single `complete` call: it is built, sent or
//! parsed once, and dropped after the reply text has been pulled out.
//! Response types ignore unknown JSON keys so new provider fields never break
//! parsing. Only `choices` and, inside a choice, `message.content` are required.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::llm_client::CompletionConfig;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub temperature: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

impl<'a> ChatRequest<'a> {
    /// Builds a single-turn request: one `user` message carrying the prompt.
    pub fn single_user(config: &'a CompletionConfig, prompt: &str) -> Self {
        Self {
            model: &config.model,
            temperature: config.temperature,
            presence_penalty: config.presence_penalty,
            frequency_penalty: config.frequency_penalty,
            max_tokens: config.max_tokens,
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[allow(dead_code)]
    #[serde(default)]
    pub id: Option<String>,
    pub choices: Vec<ChatChoice>,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Option<Usage>,
    /// Logical error reported inside a 200 body. Ignored when `choices` is non-empty.
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<ErrorDetail>,
}

impl ChatResponse {
    /// Text of the primary (index 0) choice.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[allow(dead_code)]
    #[serde(default)]
    pub index: Option<u32>,
    pub message: ResponseMessage,
    #[allow(dead_code)]
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice. The role is optional on the wire.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[allow(dead_code)]
    #[serde(default)]
    pub role: Option<Role>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
    /// String or number depending on the provider.
    #[allow(dead_code)]
    #[serde(default)]
    pub param: Option<serde_json::Value>,
    #[allow(dead_code)]
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}

/// Parses an optional informational field, mapping a value of unexpected
/// shape to `None` instead of failing the whole response.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_request_matches_wire_body() {
        let config = CompletionConfig::default();
        let request = ChatRequest::single_user(&config, "test");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["presence_penalty"], 0.0);
        assert_eq!(value["frequency_penalty"], 0.0);
        assert_eq!(value["temperature"], 0.7);

        let messages = value["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], json!({"role": "user", "content": "test"}));
    }

    #[test]
    fn test_request_uses_configured_model() {
        let config = CompletionConfig {
            model: "gpt-4o".to_string(),
            max_tokens: 1000,
            ..CompletionConfig::default()
        };
        let body = serde_json::to_string(&ChatRequest::single_user(&config, "x")).unwrap();
        assert!(body.contains(r#""model":"gpt-4o""#));
        assert!(body.contains(r#""max_tokens":1000"#));
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let body = json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "system_fingerprint": "fp_x",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "hello", "refusal": null},
                "logprobs": null,
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4, "extra": {}}
        });
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_content(), Some("hello"));
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.unwrap().total_tokens, Some(4));
    }

    #[test]
    fn test_response_tolerates_minimal_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert!(response.id.is_none());
        assert_eq!(response.choices[0].index, None);
        assert_eq!(response.choices[0].message.role, Some(Role::Assistant));
    }

    #[test]
    fn test_response_without_choices_fails() {
        let result: Result<ChatResponse, _> = serde_json::from_str(r#"{"id":"x"}"#);
        assert!(result.is_err(), "choices is required");
    }

    #[test]
    fn test_choice_without_content_fails() {
        let body = r#"{"choices":[{"message":{"role":"assistant"}}]}"#;
        let result: Result<ChatResponse, _> = serde_json::from_str(body);
        assert!(result.is_err(), "message.content is required");
    }

    #[test]
    fn test_error_detail_parses_type_field() {
        let body = json!({
            "choices": [],
            "error": {"message": "bad", "type": "invalid_request_error", "param": null, "code": "x"}
        });
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.error_type.as_deref(), Some("invalid_request_error"));
        assert_eq!(error.message.as_deref(), Some("bad"));
        assert!(error.param.is_none());
    }

    #[test]
    fn test_numeric_error_code_does_not_break_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}],"error":{"message":"partial","type":"x","param":null,"code":429}}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_content(), Some("ok"));
        assert_eq!(response.error.unwrap().code, Some(json!(429)));
    }

    #[test]
    fn test_malformed_error_and_usage_are_dropped() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}],
            "error": "rate limited",
            "usage": {"total_tokens": "many"}
        });
        let response: ChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_content(), Some("ok"));
        assert!(response.error.is_none());
        assert!(response.usage.is_none());
    }
}
