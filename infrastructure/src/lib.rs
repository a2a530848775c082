//! Infrastructure layer for translation-comparator
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: vendor HTTP clients, the usage tracker and
//! the outcome log, plus configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod telemetry;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileComparisonConfig, FileConfig, FileHttpConfig,
    FileProviderEntry, FileProvidersConfig, FileRetryConfig, FileTelemetryConfig,
};
pub use logging::JsonlOutcomeLogger;
pub use providers::{
    ChatCompletionsAdapter, ClaudeAdapter, GeminiAdapter, VendorProfile, build_adapter,
    build_registry,
};
pub use telemetry::{UsageStoreError, UsageTracker};
