//! Error taxonomy for provider calls
//!
//! [`ProviderError`] is what a single adapter attempt fails with.
//! [`CallError`] is what a governed call settles with once retries are
//! exhausted; its `Display` is the message shown to the user.

use std::time::Duration;
use thiserror::Error;

/// Failure of one adapter attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request never reached the vendor or no response came back
    #[error("Network error: {0}")]
    Network(String),

    /// The vendor answered with a failure status and (usually) an error envelope
    #[error("{vendor} API error ({status}): {message}")]
    Http {
        vendor: String,
        status: u16,
        message: String,
    },

    /// Success status, but the body did not contain usable text
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The attempt did not settle within the remaining call budget
    #[error("Attempt timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    pub fn http(vendor: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            vendor: vendor.into(),
            status,
            message: message.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse(detail.into())
    }

    /// Status classes that will not succeed on retry: bad request,
    /// authentication, permission, unknown model, validation.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ProviderError::Http {
                status: 400 | 401 | 403 | 404 | 422,
                ..
            }
        )
    }

    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Network(_) => "network",
            ProviderError::Http { .. } => "http",
            ProviderError::MalformedResponse(_) => "malformed_response",
            ProviderError::Timeout(_) => "timeout",
        }
    }
}

/// Terminal failure of a governed call
///
/// Every variant renders as a user-facing message naming the provider; the
/// technical cause is kept on the value for diagnostics only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("Couldn't connect to {provider} servers. Please try again.")]
    Exhausted {
        provider: String,
        attempts: u32,
        last_error: Option<ProviderError>,
    },

    #[error("Request to {provider} was cancelled.")]
    Cancelled { provider: String },

    /// The call's task ended without producing a result
    #[error("Couldn't connect to {provider} servers. Please try again.")]
    Aborted { provider: String },
}

impl CallError {
    pub fn exhausted(
        provider: impl Into<String>,
        attempts: u32,
        last_error: Option<ProviderError>,
    ) -> Self {
        Self::Exhausted {
            provider: provider.into(),
            attempts,
            last_error,
        }
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CallError::Cancelled { .. })
    }

    /// The underlying adapter error, if any attempt produced one
    pub fn last_error(&self) -> Option<&ProviderError> {
        match self {
            CallError::Exhausted { last_error, .. } => last_error.as_ref(),
            _ => None,
        }
    }
}
