//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave,
//! such as the retry budget for provider calls and the usage estimate.

use comparator_domain::DEFAULT_ESTIMATED_TOKENS;
use std::time::Duration;

/// Retry and timeout budget for one provider call.
///
/// All attempts of a call share a single deadline measured from the start
/// of the first attempt. No attempt is started once the deadline has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, the first one included
    pub max_attempts: u32,
    /// Total time budget shared by all attempts
    pub deadline: Duration,
    /// Flat pause between a failed attempt and the next one
    pub backoff: Duration,
    /// Stop retrying on 400/401/403/404/422 responses
    pub fail_fast_on_client_errors: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            deadline: Duration::from_secs(20),
            backoff: Duration::from_millis(100),
            fail_fast_on_client_errors: false,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, deadline: Duration) -> Self {
        Self {
            max_attempts,
            deadline,
            ..Self::default()
        }
    }

    /// Creates a policy from millisecond values, as stored in config files.
    pub fn from_millis(max_attempts: u32, deadline_ms: u64, backoff_ms: u64) -> Self {
        Self {
            max_attempts,
            deadline: Duration::from_millis(deadline_ms),
            backoff: Duration::from_millis(backoff_ms),
            fail_fast_on_client_errors: false,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast_on_client_errors = enabled;
        self
    }
}

/// Application behavior configuration.
///
/// Controls runtime behavior of use cases: the retry budget applied to every
/// provider call and the token estimate reported to telemetry per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BehaviorConfig {
    pub retry: RetryPolicy,
    pub estimated_tokens_per_call: u32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            estimated_tokens_per_call: DEFAULT_ESTIMATED_TOKENS,
        }
    }
}

impl BehaviorConfig {
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_estimated_tokens(mut self, tokens: u32) -> Self {
        self.estimated_tokens_per_call = tokens;
        self
    }
}
