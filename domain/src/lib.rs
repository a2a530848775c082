//! Domain layer for translation-comparator
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Providers
//!
//! A provider is one vendor's LLM HTTP API. Each has a static
//! [`ProviderDescriptor`]; [`ProviderKind`] lists the built-in vendors.
//!
//! ## Outcomes
//!
//! One prompt is fanned out to several providers. Each provider settles
//! exactly once with a [`CallOutcome`]: its response text, or a
//! [`CallError`] whose message names the provider.
//!
//! ## Usage
//!
//! Each attempted call is charged a flat estimate in the [`UsageLedger`].

pub mod call;
pub mod core;
pub mod prompt;
pub mod provider;
pub mod usage;

// Re-export commonly used types
pub use call::{CallError, CallOutcome, ProviderError};
pub use core::{error::DomainError, prompt::Prompt};
pub use prompt::{ComparisonMode, PromptTemplate, TARGET_LANGUAGES, language_name};
pub use provider::{MAX_PROVIDERS_PER_REQUEST, ProviderDescriptor, ProviderId, ProviderKind};
pub use usage::{
    DEFAULT_ESTIMATED_TOKENS, ProviderUsage, UsageCounter, UsageLedger, UsageSummary,
};
