//! Completion providers
//!
//! Defines the provider trait and the OpenAI-compatible implementation
//! the flashcard service talks to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::AiError;
use crate::config::AiConfig;

/// Chat-completion capability used by the flashcard service
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Whether the provider has the credentials it needs
    fn is_configured(&self) -> bool;

    /// Run one completion: fixed system instruction plus user prompt,
    /// requesting a JSON-object formatted answer. Returns the raw
    /// message content.
    async fn complete(&self, system: &str, user: &str) -> Result<String, AiError>;
}

/// OpenAI-compatible chat completion provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiProvider {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
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
            temperature: 0.7,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::unexpected(format!("Anfrage an die KI fehlgeschlagen: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .json::<UpstreamErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|error| error.message);
            return Err(AiError::upstream(status, message));
        }

        // A success body without the expected shape is treated the
        // same as a missing answer.
        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|_| AiError::EmptyCompletion)?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AiError::EmptyCompletion)
    }
}

/// Request body for the chat completions endpoint
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Response from the chat completions endpoint
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Error body of the upstream API
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: Option<String>,
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub result: Result<String, AiError>,
    pub last_prompt: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MockProvider {
    pub fn replying(content: &str) -> Self {
        Self {
            result: Ok(content.to_string()),
            last_prompt: std::sync::Mutex::new(None),
        }
    }

    pub fn failing(error: AiError) -> Self {
        Self {
            result: Err(error),
            last_prompt: std::sync::Mutex::new(None),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionProvider for MockProvider {
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, _system: &str, user: &str) -> Result<String, AiError> {
        *self.last_prompt.lock().unwrap() = Some(user.to_string());
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "Du bist ein Assistent.",
                },
                ChatMessage {
                    role: "user",
                    content: "Hallo",
                },
            ],
            temperature: 0.7,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("gpt-4o-mini"));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"type\":\"json_object\""));
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"question\":\"Q\",\"answer\":\"A\"}"},
                "finish_reason": "stop"
            }]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("{\"question\":\"Q\",\"answer\":\"A\"}")
        );
    }

    #[test]
    fn test_upstream_error_deserialization() {
        let json = r#"{"error": {"message": "Rate limit reached", "type": "rate_limit_error"}}"#;
        let body: UpstreamErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(
            body.error.and_then(|e| e.message).as_deref(),
            Some("Rate limit reached")
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let provider = OpenAiProvider::new(&AiConfig {
            api_key: None,
            base_url: "http://localhost:9".to_string(),
            model: "gpt-4o-mini".to_string(),
        });

        assert!(!provider.is_configured());
        // No credential, no network call: the error is immediate.
        let err = provider.complete("system", "user").await.unwrap_err();
        assert_eq!(err, AiError::MissingApiKey);
    }
}
