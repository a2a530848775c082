//! Google Gemini `generateContent` adapter

use super::http::{ErrorShape, MAX_OUTPUT_TOKENS, TEMPERATURE, execute, require_text};
use async_trait::async_trait;
use comparator_application::ProviderAdapter;
use comparator_domain::{ProviderDescriptor, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    thinking_config: ThinkingConfig,
}

/// A zero budget keeps "thinking" from using up the output tokens
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini authenticates with a `key` query parameter and addresses the
/// model in the URL path.
pub struct GeminiAdapter {
    client: reqwest::Client,
    descriptor: ProviderDescriptor,
    api_key: String,
}

impl GeminiAdapter {
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

    fn url(&self, model: &str) -> String {
        format!(
            "{}/{}:generateContent",
            self.descriptor.endpoint.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn call(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let vendor = self.descriptor.display_name.as_str();
        let url = self.url(model.unwrap_or(&self.descriptor.default_model));
        debug!(provider = %self.descriptor.id, "POST {}", url);

        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let request = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body);

        let response: GenerateResponse = execute(request, vendor, ErrorShape::Nested).await?;
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text);
        require_text(text, vendor, "candidates")
    }
}
