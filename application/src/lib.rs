//! Application layer for translation-comparator
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, RetryPolicy};
pub use ports::{
    composite_sink::CompositeOutcomeSink,
    outcome_sink::{NoOutcomeSink, OutcomeSink},
    provider_adapter::ProviderAdapter,
    telemetry::{NoTelemetry, TelemetryHook},
};
pub use registry::{ProviderRegistry, RegisteredProvider, RequestError};
pub use use_cases::compare_providers::{
    CallSingleError, CompareProvidersUseCase, FanOutReport, FanOutRequest,
};
pub use use_cases::governed_call::RetryGovernor;
