//! Comparison modes and language names

use super::template::PromptTemplate;
use crate::core::error::DomainError;
use serde::Serialize;

/// What the providers are asked to do with the user's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonMode {
    Translate,
    Grammar,
    Usage,
}

impl ComparisonMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::Translate => "translate",
            ComparisonMode::Grammar => "grammar",
            ComparisonMode::Usage => "usage",
        }
    }

    /// Build the prompt for this mode.
    ///
    /// `second_language` is the translation target for [`Translate`](Self::Translate)
    /// and the language to answer in for the other modes.
    pub fn build_prompt(&self, text: &str, source_language: &str, second_language: &str) -> String {
        match self {
            ComparisonMode::Translate => {
                PromptTemplate::translation(text, source_language, second_language)
            }
            ComparisonMode::Grammar => PromptTemplate::grammar(text, source_language, second_language),
            ComparisonMode::Usage => PromptTemplate::usage(text, source_language, second_language),
        }
    }
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComparisonMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "translate" | "translation" => Ok(ComparisonMode::Translate),
            "grammar" => Ok(ComparisonMode::Grammar),
            "usage" => Ok(ComparisonMode::Usage),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

/// Translation targets offered by the language tabs
pub const TARGET_LANGUAGES: [(&str, &str); 3] =
    [("es", "Spanish"), ("fr", "French"), ("tr", "Turkish")];

/// Map a target language to the name used in prompts.
///
/// Accepts a code (`es`) or a full name (`spanish`), case-insensitively.
pub fn language_name(code_or_name: &str) -> Result<&'static str, DomainError> {
    let wanted = code_or_name.trim();
    TARGET_LANGUAGES
        .iter()
        .find(|(code, name)| code.eq_ignore_ascii_case(wanted) || name.eq_ignore_ascii_case(wanted))
        .map(|(_, name)| *name)
        .ok_or_else(|| DomainError::UnknownLanguage(code_or_name.to_string()))
}
