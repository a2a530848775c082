//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Unknown provider kind: {0}")]
    UnknownProviderKind(String),

    #[error("Unknown comparison mode: {0}")]
    UnknownMode(String),
}
