//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The exact text sent to every selected provider (Value Object)
///
/// Opaque to the orchestration layer: it is built by the prompt templates
/// and passed through verbatim. The only rule is that it is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Create a new prompt, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(Self { content })
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Prompt {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Prompt::new(s)
    }
}

impl TryFrom<String> for Prompt {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Prompt::new(s)
    }
}
