//! Per-provider call outcome

use super::error::CallError;
use crate::provider::ProviderId;

/// Terminal result of one provider's governed call (Value Object)
///
/// Exactly one of text or error is present. Produced once per provider per
/// fan-out and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    provider_id: ProviderId,
    result: Result<String, CallError>,
}

impl CallOutcome {
    pub fn new(provider_id: ProviderId, result: Result<String, CallError>) -> Self {
        Self {
            provider_id,
            result,
        }
    }

    pub fn success(provider_id: impl Into<ProviderId>, text: impl Into<String>) -> Self {
        Self::new(provider_id.into(), Ok(text.into()))
    }

    pub fn failure(provider_id: impl Into<ProviderId>, error: CallError) -> Self {
        Self::new(provider_id.into(), Err(error))
    }

    pub fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    pub fn text(&self) -> Option<&str> {
        self.result.as_deref().ok()
    }

    pub fn error(&self) -> Option<&CallError> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn result(&self) -> &Result<String, CallError> {
        &self.result
    }

    pub fn into_result(self) -> Result<String, CallError> {
        self.result
    }

    /// Text for the provider's output slot: the response, or `Error: <message>`
    pub fn display_text(&self) -> String {
        match &self.result {
            Ok(text) => text.clone(),
            Err(error) => format!("Error: {}", error),
        }
    }
}
