//! Telemetry configuration from TOML (`[telemetry]` section)

use comparator_domain::DEFAULT_ESTIMATED_TOKENS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw telemetry configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelemetryConfig {
    /// Tokens charged per call in the usage estimate
    pub estimated_tokens: u32,
    /// Where the usage ledger is kept between runs
    pub usage_file: Option<PathBuf>,
}

impl Default for FileTelemetryConfig {
    fn default() -> Self {
        Self {
            estimated_tokens: DEFAULT_ESTIMATED_TOKENS,
            usage_file: None,
        }
    }
}

impl FileTelemetryConfig {
    /// Configured usage file, or `<data dir>/translation-comparator/usage.json`
    pub fn usage_file_path(&self) -> Option<PathBuf> {
        self.usage_file.clone().or_else(|| {
            dirs::data_dir().map(|d| d.join("translation-comparator").join("usage.json"))
        })
    }
}
