//! Vendor HTTP adapters
//!
//! Each adapter implements the
//! [`ProviderAdapter`](comparator_application::ProviderAdapter) port for one
//! vendor wire format and performs exactly one request per call.

mod anthropic;
mod gemini;
mod http;
mod openai_compatible;
mod registry;

pub use anthropic::{ANTHROPIC_VERSION, ClaudeAdapter};
pub use gemini::GeminiAdapter;
pub use http::ErrorShape;
pub use openai_compatible::{ChatCompletionsAdapter, VendorProfile};
pub use registry::{build_adapter, build_registry};
