use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::LlmSettings;

/// Chat completions transport. The agent only talks to the provider through
/// this seam, so tests can swap in canned responses.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat_completion(&self, request: ChatCompletionRequest)
    -> Result<ChatCompletionResponse>;
}

pub type DynLlmClient = dyn LlmClient;

/// Client for OpenAI-compatible chat completion endpoints (Groq by default).
#[derive(Debug, Clone)]
pub struct AIClient {
    http: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl AIClient {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let base_url = settings.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(anyhow!("LLM base URL cannot be empty"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
            user_agent: settings.user_agent.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for AIClient {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "sending chat completion request"
        );
        trace!(body = ?serde_json::to_string(&request).ok(), "chat completion payload");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to chat completions endpoint")?;

        let status = response.status();
        debug!(%status, "chat completion response received");

        match status {
            reqwest::StatusCode::OK => response
                .json::<ChatCompletionResponse>()
                .await
                .context("Failed to parse chat completion response JSON"),
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                let error_text = response.text().await.unwrap_or_default();
                let error_msg = if error_text.contains("tokens per minute") {
                    "Token rate limit exceeded. Please wait a minute and try again."
                } else if error_text.contains("per day") {
                    "Daily request quota exhausted for this API key."
                } else {
                    "Too many requests. Please wait before trying again."
                };
                Err(anyhow!("{} (API response: {})", error_msg, error_text))
            }
            reqwest::StatusCode::UNAUTHORIZED => Err(anyhow!(
                "Invalid API key. Please check your Groq API key configuration."
            )),
            reqwest::StatusCode::BAD_REQUEST => {
                let error_text = response.text().await.unwrap_or_default();
                if error_text.contains("tool_use_failed") {
                    Err(anyhow!(
                        "The model produced a malformed tool call: {}",
                        error_text
                    ))
                } else {
                    Err(anyhow!("Invalid request: {}", error_text))
                }
            }
            reqwest::StatusCode::INTERNAL_SERVER_ERROR
            | reqwest::StatusCode::BAD_GATEWAY
            | reqwest::StatusCode::SERVICE_UNAVAILABLE => Err(anyhow!(
                "Service is temporarily unavailable. Please try again later."
            )),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(anyhow!("API error (status {}): {}", status, error_text))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::text(ChatMessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text(ChatMessageRole::User, content)
    }

    pub fn assistant_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: ChatMessageRole::Assistant,
            content,
            tool_calls: Some(tool_calls),
            tool_call_id: None,
        }
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ChatMessageRole::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    fn text(role: ChatMessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn content_str(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object, exactly as the model produced it.
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            kind: function_kind(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn sample_settings(base_url: String) -> LlmSettings {
        LlmSettings {
            api_key: "gsk-test".to_string(),
            timeout_secs: 30,
            base_url,
            user_agent: "roam/test".to_string(),
        }
    }

    fn hello_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "llama-3.3-70b-versatile".into(),
            messages: vec![ChatMessage::user("Hello")],
            max_tokens: Some(128),
            temperature: None,
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    #[tokio::test]
    async fn chat_completion_successfully_parses_response() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/v1/chat/completions")
                    .header("Authorization", "Bearer gsk-test")
                    .header("User-Agent", "roam/test")
                    .json_body(json!({
                        "model": "llama-3.3-70b-versatile",
                        "messages": [
                            {"role": "user", "content": "Hello"}
                        ],
                        "max_tokens": 128
                    }));

                then.status(200).json_body(json!({
                    "model": "llama-3.3-70b-versatile",
                    "choices": [
                        {
                            "index": 0,
                            "finish_reason": "stop",
                            "message": {"role": "assistant", "content": "Bonjour!"}
                        }
                    ],
                    "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
                }));
            })
            .await;

        let client = AIClient::new(&sample_settings(server.url("/openai/v1/"))).unwrap();
        let response = client.chat_completion(hello_request()).await.unwrap();

        assert_eq!(response.choices.len(), 1);
        let choice = &response.choices[0];
        assert_eq!(choice.finish_reason.as_deref(), Some("stop"));
        assert_eq!(choice.message.content_str(), "Bonjour!");
        assert!(choice.message.tool_calls.is_none());
        assert_eq!(response.usage.and_then(|u| u.total_tokens), Some(15));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_completion_parses_tool_calls() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/chat/completions")
                    .body_contains("\"tool_choice\":\"auto\"")
                    .body_contains("\"name\":\"search_google\"");

                then.status(200).json_body(json!({
                    "choices": [
                        {
                            "finish_reason": "tool_calls",
                            "message": {
                                "role": "assistant",
                                "content": null,
                                "tool_calls": [
                                    {
                                        "id": "call_1",
                                        "type": "function",
                                        "function": {
                                            "name": "search_google",
                                            "arguments": "{\"query\":\"Paris museums\"}"
                                        }
                                    }
                                ]
                            }
                        }
                    ]
                }));
            })
            .await;

        let client = AIClient::new(&sample_settings(server.url("/v1"))).unwrap();
        let mut request = hello_request();
        request.tools = vec![ToolDefinition::function(
            "search_google",
            "Search Google",
            json!({"type": "object", "properties": {}}),
        )];
        request.tool_choice = Some("auto".to_string());

        let response = client.chat_completion(request).await.unwrap();
        let message = &response.choices[0].message;
        assert_eq!(message.content, None);
        let calls = message.tool_calls.as_ref().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].kind, "function");
        assert_eq!(calls[0].function.name, "search_google");
        assert_eq!(calls[0].function.arguments, "{\"query\":\"Paris museums\"}");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_completion_maps_unauthorized() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(401)
                    .header("Content-Type", "application/json")
                    .body(r#"{"error":{"message":"Invalid API Key"}}"#);
            })
            .await;

        let client = AIClient::new(&sample_settings(server.url("/v1"))).unwrap();
        let err = client.chat_completion(hello_request()).await.unwrap_err();

        assert!(err.to_string().contains("Invalid API key"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_completion_maps_rate_limit() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(429)
                    .body("Rate limit reached on tokens per minute (TPM)");
            })
            .await;

        let client = AIClient::new(&sample_settings(server.url("/v1"))).unwrap();
        let err = client.chat_completion(hello_request()).await.unwrap_err();

        assert!(err.to_string().contains("Token rate limit exceeded"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_completion_reports_unexpected_status() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/chat/completions");
                then.status(404).body("no such model");
            })
            .await;

        let client = AIClient::new(&sample_settings(server.url("/v1"))).unwrap();
        let err = client.chat_completion(hello_request()).await.unwrap_err();

        assert!(err.to_string().contains("API error (status 404"));
        assert!(err.to_string().contains("no such model"));
        mock.assert_async().await;
    }

    #[test]
    fn new_rejects_empty_base_url() {
        let err = AIClient::new(&sample_settings("/".to_string())).unwrap_err();
        assert!(err.to_string().contains("base URL cannot be empty"));
    }

    #[test]
    fn tool_result_message_serializes_call_id() {
        let message = ChatMessage::tool_result("call_9", "1. Louvre");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({"role": "tool", "content": "1. Louvre", "tool_call_id": "call_9"})
        );
    }
}
