//! Configuration file loading for translation-comparator
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COMPARATOR_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./comparator.toml` or `./.comparator.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/translation-comparator/config.toml`
//! 5. Fallback: `~/.config/translation-comparator/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileComparisonConfig, FileConfig, FileHttpConfig, FileProviderEntry,
    FileProvidersConfig, FileRetryConfig, FileTelemetryConfig,
};
pub use loader::ConfigLoader;
