//! Anthropic Messages API adapter (Claude)

use super::http::{ErrorShape, MAX_OUTPUT_TOKENS, TEMPERATURE, execute, require_text};
use async_trait::async_trait;
use comparator_application::ProviderAdapter;
use comparator_domain::{ProviderDescriptor, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

pub struct ClaudeAdapter {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
    api_key: String,
}

impl ClaudeAdapter {
    pub fn new(
        client: reqwest::Client,
        descriptor: ProviderDescriptor,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            descriptor,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ProviderAdapter for ClaudeAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn call(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let vendor = self.descriptor.display_name.as_str();
        let model = model.unwrap_or(&self.descriptor.default_model);
        debug!(provider = %self.descriptor.id, model, "POST {}", self.descriptor.endpoint);

        let body = MessagesRequest {
            model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        let request = self
            .client
            .post(&self.descriptor.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: MessagesResponse = execute(request, vendor, ErrorShape::Nested).await?;
        let text = response
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text);
        require_text(text, vendor, "content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comparator_domain::ProviderKind;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter_for(server: &MockServer) -> ClaudeAdapter {
        let descriptor = ProviderKind::Claude
            .descriptor()
            .with_endpoint(format!("{}/v1/messages", server.uri()));
        ClaudeAdapter::new(reqwest::Client::new(), descriptor, "claude-key")
    }

    #[tokio::test]
    async fn test_success_reads_first_content_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "claude-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": "claude-3-5-haiku-20241022",
                "messages": [{"role": "user", "content": "Translate: Hello"}],
                "max_tokens": 1000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": " Hola "}],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = adapter_for(&server).call("Translate: Hello", None).await.unwrap();
        assert_eq!(text, "Hola");
    }

    #[tokio::test]
    async fn test_empty_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let err = adapter_for(&server).call("hi", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_overloaded_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let err = adapter_for(&server).call("hi", None).await.unwrap_err();
        assert_eq!(err, ProviderError::http("Claude Haiku 3.5", 529, "Overloaded"));
        assert!(!err.is_client_error());
    }
}
