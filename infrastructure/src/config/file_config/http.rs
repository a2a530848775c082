//! HTTP client configuration from TOML (`[http]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw HTTP client configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// TCP/TLS connect timeout. Request time is bounded by `[retry]`.
    pub connect_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            user_agent: concat!("translation-comparator/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FileHttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Build the client shared by every adapter
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout())
            .user_agent(self.user_agent.clone())
            .build()
    }
}
