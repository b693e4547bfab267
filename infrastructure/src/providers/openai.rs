//! OpenAI-compatible chat-completions gateway
//!
//! Every benchmarked model is reached through one endpoint that speaks the
//! `/chat/completions` protocol (OpenAI itself or an aggregating proxy).

use async_trait::async_trait;
use mcq_application::ports::llm_gateway::{GatewayError, LlmGateway};
use mcq_domain::Model;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// [`LlmGateway`] over an OpenAI-compatible HTTP endpoint
pub struct OpenAiGateway {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiGateway {
    /// Build a client with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        })
    }

    /// Set custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bearer token; requests are sent unauthenticated without one
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Reply text of a successful response body: `choices[0].message.content`,
/// empty when the body carries no content
fn parse_reply(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default())
}

/// Map a non-success status and its body to a gateway error
fn status_error(status: StatusCode, body: &str, model: &Model) -> GatewayError {
    let message = match serde_json::from_str::<ApiError>(body) {
        Ok(error) => error.error.message,
        Err(_) => body.chars().take(200).collect(),
    };
    if status == StatusCode::NOT_FOUND {
        return GatewayError::ModelNotAvailable(format!("{}: {}", model, message));
    }
    GatewayError::HttpStatus {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(&self, model: &Model, prompt: &str) -> Result<String, GatewayError> {
        let body = ChatRequest {
            model: model.as_str(),
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut request = self.http_client.post(self.endpoint()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else if e.is_connect() {
                GatewayError::ConnectionError(e.to_string())
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        if !status.is_success() {
            return Err(status_error(status, &text, model));
        }

        let reply = parse_reply(&text)?;
        debug!("{} replied with {} bytes", model, reply.len());
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "答案是B"}},
                {"index": 1, "message": {"role": "assistant", "content": "A"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3}
        }"#;
        assert_eq!(parse_reply(body).unwrap(), "答案是B");
    }

    #[test]
    fn test_parse_reply_without_content_is_empty() {
        assert_eq!(parse_reply(r#"{"choices": []}"#).unwrap(), "");
        assert_eq!(parse_reply(r#"{}"#).unwrap(), "");
        assert_eq!(
            parse_reply(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#)
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_parse_reply_rejects_non_json() {
        assert!(matches!(
            parse_reply("<html>bad gateway</html>"),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_status_error_uses_api_message() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#;
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, body, &Model::Gpt4o);
        match err {
            GatewayError::HttpStatus { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_status_error_not_found_is_model_not_available() {
        let err = status_error(StatusCode::NOT_FOUND, "no such model", &Model::Glm4Plus);
        assert!(matches!(err, GatewayError::ModelNotAvailable(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = OpenAiGateway::new(Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:8000/v1/");
        assert_eq!(gateway.endpoint(), "http://localhost:8000/v1/chat/completions");
    }
}
