//! Adapter for vendors speaking the OpenAI chat-completions protocol
//!
//! OpenAI, Mistral, Perplexity, DeepSeek, Grok and OpenRouter share the
//! request and response shapes; they differ only in error envelope and
//! extra headers, captured by [`VendorProfile`].

use super::http::{ErrorShape, MAX_OUTPUT_TOKENS, TEMPERATURE, execute, require_text};
use async_trait::async_trait;
use comparator_application::ProviderAdapter;
use comparator_domain::{ProviderDescriptor, ProviderError, ProviderKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-vendor differences of the chat-completions protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorProfile {
    pub error_shape: ErrorShape,
    pub extra_headers: Vec<(&'static str, &'static str)>,
}

impl VendorProfile {
    pub fn standard() -> Self {
        Self {
            error_shape: ErrorShape::Nested,
            extra_headers: Vec::new(),
        }
    }

    pub fn for_kind(kind: ProviderKind) -> Self {
        match kind {
            ProviderKind::Mistral => Self {
                error_shape: ErrorShape::TopLevel,
                extra_headers: Vec::new(),
            },
            ProviderKind::OpenRouter => Self {
                error_shape: ErrorShape::Nested,
                extra_headers: vec![
                    ("HTTP-Referer", "https://translationcomparator.app"),
                    ("X-Title", "Translation Comparator"),
                ],
            },
            _ => Self::standard(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Bearer-authenticated chat-completions endpoint
pub struct ChatCompletionsAdapter {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
    api_key: String,
    profile: VendorProfile,
}

impl ChatCompletionsAdapter {
    pub fn new(
        client: reqwest::Client,
        descriptor: ProviderDescriptor,
        api_key: impl Into<String>,
        profile: VendorProfile,
    ) -> Self {
        Self {
            client,
            descriptor,
            api_key: api_key.into(),
            profile,
        }
    }
}

#[async_trait]
impl ProviderAdapter for ChatCompletionsAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn call(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let vendor = self.descriptor.display_name.as_str();
        let model = model.unwrap_or(&self.descriptor.default_model);
        debug!(provider = %self.descriptor.id, model, "POST {}", self.descriptor.endpoint);

        let body = ChatRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let mut request = self
            .client
            .post(&self.descriptor.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);
        for (name, value) in &self.profile.extra_headers {
            request = request.header(*name, *value);
        }

        let response: ChatResponse = execute(request, vendor, self.profile.error_shape).await?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);
        require_text(text, vendor, "choices")
    }
}
