//! Comparison defaults from TOML (`[comparison]` section)

use serde::{Deserialize, Serialize};

/// Raw comparison configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileComparisonConfig {
    /// Providers to compare when none are given on the command line.
    /// Empty means every registered provider enabled by default.
    pub providers: Vec<String>,
    /// Language of the text being analyzed
    pub source_language: String,
    /// Target language code for translations (`es`, `fr`, `tr`)
    pub target_language: String,
    /// Language grammar and usage explanations are written in
    pub response_language: String,
}

impl Default for FileComparisonConfig {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            source_language: "English".to_string(),
            target_language: "es".to_string(),
            response_language: "English".to_string(),
        }
    }
}
