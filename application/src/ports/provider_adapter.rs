//! Provider adapter port
//!
//! Defines the interface for sending a prompt to one vendor's LLM API.

use async_trait::async_trait;
use comparator_domain::{ProviderDescriptor, ProviderError};

/// One vendor's text-generation endpoint
///
/// An adapter performs exactly one HTTP request per [`call`](Self::call):
/// no retries and no timeouts of its own. Both are applied by the
/// [`RetryGovernor`](crate::use_cases::governed_call::RetryGovernor).
/// Dropping the returned future aborts the request.
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Static metadata for this provider
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Send `prompt` and return the first generated text.
    ///
    /// `model` overrides the descriptor's default model when given.
    async fn call(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError>;
}
