//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod comparison;
mod http;
mod providers;
mod retry;
mod telemetry;

pub use comparison::FileComparisonConfig;
pub use http::FileHttpConfig;
pub use providers::{FileProviderEntry, FileProvidersConfig};
pub use retry::FileRetryConfig;
pub use telemetry::FileTelemetryConfig;

use comparator_application::BehaviorConfig;
use comparator_domain::{MAX_PROVIDERS_PER_REQUEST, ProviderKind, language_name};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("retry.max_attempts cannot be 0")]
    ZeroAttempts,

    #[error("retry.deadline_ms cannot be 0")]
    ZeroDeadline,

    #[error("[providers.{0}] does not name a known provider")]
    UnknownProviderSection(String),

    #[error("comparison.providers: unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("comparison.providers lists {count} providers; at most {max} are compared at once")]
    TooManyProviders { count: usize, max: usize },

    #[error("comparison.target_language: unknown language code '{0}'")]
    UnknownTargetLanguage(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Retry/timeout budget per provider call
    pub retry: FileRetryConfig,
    /// Usage estimate settings
    pub telemetry: FileTelemetryConfig,
    /// Shared HTTP client settings
    pub http: FileHttpConfig,
    /// Per-vendor overrides
    pub providers: FileProvidersConfig,
    /// Default selection and languages
    pub comparison: FileComparisonConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigValidationError::ZeroAttempts);
        }
        if self.retry.deadline_ms == 0 {
            return Err(ConfigValidationError::ZeroDeadline);
        }

        if let Some(id) = self.providers.unknown_ids().first() {
            return Err(ConfigValidationError::UnknownProviderSection(
                (*id).to_string(),
            ));
        }

        let selection = &self.comparison.providers;
        if selection.len() > MAX_PROVIDERS_PER_REQUEST {
            return Err(ConfigValidationError::TooManyProviders {
                count: selection.len(),
                max: MAX_PROVIDERS_PER_REQUEST,
            });
        }
        if let Some(id) = selection.iter().find(|id| id.parse::<ProviderKind>().is_err()) {
            return Err(ConfigValidationError::UnknownProvider(id.clone()));
        }

        if language_name(&self.comparison.target_language).is_err() {
            return Err(ConfigValidationError::UnknownTargetLanguage(
                self.comparison.target_language.clone(),
            ));
        }

        Ok(())
    }

    /// Convert to application-level behavior configuration
    pub fn to_behavior_config(&self) -> BehaviorConfig {
        BehaviorConfig::default()
            .with_retry(self.retry.to_policy())
            .with_estimated_tokens(self.telemetry.estimated_tokens)
    }
}
