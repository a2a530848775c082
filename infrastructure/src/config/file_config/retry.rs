//! Retry configuration from TOML (`[retry]` section)

use comparator_application::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Raw retry configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Attempts per provider call, the first one included
    pub max_attempts: u32,
    /// Budget shared by all attempts of one call
    pub deadline_ms: u64,
    /// Pause between attempts
    pub backoff_ms: u64,
    /// Give up immediately on 400/401/403/404/422
    pub fail_fast_on_client_errors: bool,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            deadline_ms: 20_000,
            backoff_ms: 100,
            fail_fast_on_client_errors: false,
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::from_millis(self.max_attempts, self.deadline_ms, self.backoff_ms)
            .with_fail_fast(self.fail_fast_on_client_errors)
    }
}
