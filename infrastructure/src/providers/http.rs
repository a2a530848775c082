//! Request execution and error normalization shared by every vendor

use comparator_domain::ProviderError;
use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Sampling temperature sent to every vendor
pub(crate) const TEMPERATURE: f32 = 0.7;

/// Output token cap sent to every vendor
pub(crate) const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Where a vendor puts the human-readable message of a failure response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    /// `{"error": {"message": "..."}}`
    Nested,
    /// `{"message": "..."}`
    TopLevel,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ErrorShape {
    fn message(self, body: &str) -> Option<String> {
        let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
        match self {
            ErrorShape::Nested => envelope.error.and_then(|e| e.message),
            ErrorShape::TopLevel => envelope.message,
        }
    }
}

/// Send `request` once and decode a success body as `T`.
///
/// Failure statuses become [`ProviderError::Http`] carrying the vendor's
/// message, or the status reason phrase when the body has none.
pub(crate) async fn execute<T: DeserializeOwned>(
    request: RequestBuilder,
    vendor: &str,
    shape: ErrorShape,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = shape
            .message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
        return Err(ProviderError::http(vendor, status.as_u16(), message));
    }

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::malformed(format!("Failed to parse {vendor} response: {e}")))
}

/// Trimmed text, or a malformed-response error naming what was missing.
///
/// Blank text counts as missing.
pub(crate) fn require_text(
    text: Option<String>,
    vendor: &str,
    missing: &str,
) -> Result<String, ProviderError> {
    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ProviderError::malformed(format!("No {missing} in {vendor} response")))
}
