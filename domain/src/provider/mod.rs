//! Provider identity and static configuration.
//!
//! - [`ProviderId`] — registry key
//! - [`ProviderDescriptor`] — display name, endpoint, default model, priority
//! - [`ProviderKind`] — the built-in vendors and their catalog entries

pub mod descriptor;
pub mod id;

pub use descriptor::{ProviderDescriptor, ProviderKind};
pub use id::ProviderId;

/// Upper bound on providers in one fan-out request
pub const MAX_PROVIDERS_PER_REQUEST: usize = 5;
