//! Static provider descriptors and the built-in vendor catalog

use super::id::ProviderId;
use crate::core::error::DomainError;
use serde::Serialize;

/// Static configuration of one LLM provider
///
/// Immutable once registered. `priority` only fixes iteration and log order
/// (lower runs first); it has no effect on which result arrives first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub display_name: String,
    pub endpoint: String,
    pub default_model: String,
    pub priority: u32,
    /// Selected when the caller does not name providers explicitly
    pub enabled_by_default: bool,
}

impl ProviderDescriptor {
    pub fn new(
        id: impl Into<ProviderId>,
        display_name: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
        priority: u32,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
            priority,
            enabled_by_default: false,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.enabled_by_default = enabled;
        self
    }
}

/// The LLM vendors with a built-in adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Claude,
    Gemini,
    Mistral,
    Perplexity,
    DeepSeek,
    Grok,
    OpenRouter,
}

impl ProviderKind {
    /// All vendors in priority order
    pub const ALL: [ProviderKind; 8] = [
        ProviderKind::OpenAi,
        ProviderKind::Claude,
        ProviderKind::Gemini,
        ProviderKind::Mistral,
        ProviderKind::Perplexity,
        ProviderKind::DeepSeek,
        ProviderKind::Grok,
        ProviderKind::OpenRouter,
    ];

    /// Get the registry id for this vendor
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Mistral => "mistral",
            ProviderKind::Perplexity => "perplexity",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Grok => "grok",
            ProviderKind::OpenRouter => "openrouter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "GPT-4.1",
            ProviderKind::Claude => "Claude Haiku 3.5",
            ProviderKind::Gemini => "Gemini 2.5 Flash",
            ProviderKind::Mistral => "Mistral",
            ProviderKind::Perplexity => "Perplexity Sonar",
            ProviderKind::DeepSeek => "DeepSeek",
            ProviderKind::Grok => "Grok",
            ProviderKind::OpenRouter => "OpenRouter (Llama)",
        }
    }

    /// Base endpoint. For Gemini the model and method are appended per call.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
            ProviderKind::Claude => "https://api.anthropic.com/v1/messages",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
            ProviderKind::Mistral => "https://api.mistral.ai/v1/chat/completions",
            ProviderKind::Perplexity => "https://api.perplexity.ai/chat/completions",
            ProviderKind::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
            ProviderKind::Grok => "https://api.x.ai/v1/chat/completions",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Claude => "claude-3-5-haiku-20241022",
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::Mistral => "mistral-small-latest",
            ProviderKind::Perplexity => "sonar",
            ProviderKind::DeepSeek => "deepseek-chat",
            ProviderKind::Grok => "grok-2-1212",
            ProviderKind::OpenRouter => "meta-llama/llama-3.3-70b-instruct",
        }
    }

    pub fn priority(&self) -> u32 {
        match self {
            ProviderKind::OpenAi => 1,
            ProviderKind::Claude => 2,
            ProviderKind::Gemini => 3,
            ProviderKind::Mistral => 4,
            ProviderKind::Perplexity => 5,
            ProviderKind::DeepSeek => 6,
            ProviderKind::Grok => 7,
            ProviderKind::OpenRouter => 8,
        }
    }

    pub fn enabled_by_default(&self) -> bool {
        matches!(
            self,
            ProviderKind::Perplexity
                | ProviderKind::DeepSeek
                | ProviderKind::Grok
                | ProviderKind::OpenRouter
        )
    }

    /// Environment variable holding the API key unless configured otherwise
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Claude => "CLAUDE_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Mistral => "MISTRAL_API_KEY",
            ProviderKind::Perplexity => "PERPLEXITY_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderKind::Grok => "GROK_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Build the built-in descriptor for this vendor
    pub fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor::new(
            self.as_str(),
            self.display_name(),
            self.endpoint(),
            self.default_model(),
            self.priority(),
        )
        .enabled_by_default(self.enabled_by_default())
    }

    /// Descriptors for every built-in vendor, in priority order
    pub fn catalog() -> Vec<ProviderDescriptor> {
        Self::ALL.iter().map(|kind| kind.descriptor()).collect()
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownProviderKind(s.to_string()))
    }
}
