//! Retry/timeout governor for provider calls
//!
//! Wraps a single-attempt operation with a bounded number of attempts that
//! all share one deadline. Each attempt is raced against the time left;
//! losing the race drops the attempt's future, which aborts its request.

use crate::config::RetryPolicy;
use comparator_domain::{CallError, ProviderError};
use std::future::Future;
use tokio::time::{Instant, sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Applies a [`RetryPolicy`] to provider calls
#[derive(Debug, Clone, Default)]
pub struct RetryGovernor {
    policy: RetryPolicy,
}

/// Bookkeeping for one governed call
struct RetryState {
    started: Instant,
    deadline: Instant,
    attempts: u32,
    last_error: Option<ProviderError>,
}

impl RetryState {
    fn new(budget: std::time::Duration) -> Self {
        let started = Instant::now();
        Self {
            started,
            deadline: started + budget,
            attempts: 0,
            last_error: None,
        }
    }

    fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}

impl RetryGovernor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds or the budget is spent.
    ///
    /// `provider_name` is the human-readable name used in the terminal
    /// error message. Cancelling `cancellation` stops the call at the next
    /// await point, including in the middle of an attempt.
    pub async fn guard<F, Fut>(
        &self,
        provider_name: &str,
        cancellation: &CancellationToken,
        mut operation: F,
    ) -> Result<String, CallError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<String, ProviderError>>,
    {
        let mut state = RetryState::new(self.policy.deadline);

        while state.attempts < self.policy.max_attempts {
            let now = Instant::now();
            if now >= state.deadline {
                warn!(
                    provider = provider_name,
                    attempts = state.attempts,
                    elapsed_ms = state.elapsed_ms(),
                    "Deadline reached, not starting another attempt"
                );
                break;
            }

            let remaining = state.deadline - now;
            state.attempts += 1;
            debug!(
                provider = provider_name,
                attempt = state.attempts,
                remaining_ms = remaining.as_millis(),
                "Starting attempt"
            );

            let attempt = tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!(provider = provider_name, attempt = state.attempts, "Call cancelled");
                    return Err(CallError::Cancelled {
                        provider: provider_name.to_string(),
                    });
                }
                result = timeout(remaining, operation()) => {
                    result.unwrap_or(Err(ProviderError::Timeout(remaining)))
                }
            };

            let err = match attempt {
                Ok(text) => {
                    info!(
                        provider = provider_name,
                        attempt = state.attempts,
                        elapsed_ms = state.elapsed_ms(),
                        "Call succeeded"
                    );
                    return Ok(text);
                }
                Err(err) => err,
            };

            if self.policy.fail_fast_on_client_errors && err.is_client_error() {
                warn!(
                    provider = provider_name,
                    attempt = state.attempts,
                    error = %err,
                    "Client error, not retrying"
                );
                state.last_error = Some(err);
                break;
            }

            if state.attempts >= self.policy.max_attempts {
                state.last_error = Some(err);
                break;
            }

            warn!(
                provider = provider_name,
                attempt = state.attempts,
                max_attempts = self.policy.max_attempts,
                error = %err,
                "Attempt failed, retrying"
            );
            state.last_error = Some(err);

            tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!(provider = provider_name, "Call cancelled during backoff");
                    return Err(CallError::Cancelled {
                        provider: provider_name.to_string(),
                    });
                }
                _ = sleep(self.policy.backoff) => {}
            }
        }

        error!(
            provider = provider_name,
            attempts = state.attempts,
            elapsed_ms = state.elapsed_ms(),
            last_error = ?state.last_error,
            "All attempts failed"
        );
        Err(CallError::exhausted(
            provider_name,
            state.attempts,
            state.last_error,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn governor() -> RetryGovernor {
        RetryGovernor::new(RetryPolicy::default())
    }

    fn network_error() -> ProviderError {
        ProviderError::Network("connection reset".to_string())
    }

    /// Increments a counter when dropped
    struct DropFlag(Arc<AtomicU32>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result = governor()
            .guard("Grok", &CancellationToken::new(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, ProviderError>("hola".to_string()) }
            })
            .await;

        assert_eq!(result, Ok("hola".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_second_attempt() {
        let calls = AtomicU32::new(0);
        let result = governor()
            .guard("OpenAI", &CancellationToken::new(), || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(network_error())
                    } else {
                        Ok("bonjour".to_string())
                    }
                }
            })
            .await;

        assert_eq!(result, Ok("bonjour".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_max_attempts() {
        let calls = AtomicU32::new(0);
        let result = governor()
            .guard("Mistral", &CancellationToken::new(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<String, _>(network_error()) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Couldn't connect to Mistral servers. Please try again."
        );
        match err {
            CallError::Exhausted {
                attempts,
                last_error,
                ..
            } => {
                assert_eq!(attempts, 3);
                assert_eq!(last_error, Some(network_error()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_attempt_is_cut_off_at_deadline() {
        let started = Instant::now();
        let calls = AtomicU32::new(0);
        let result = governor()
            .guard("Claude", &CancellationToken::new(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    sleep(Duration::from_secs(60)).await;
                    Ok::<_, ProviderError>("late".to_string())
                }
            })
            .await;

        // The first attempt consumes the whole budget; no second attempt starts.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() <= Duration::from_secs(20) + Duration::from_millis(100));
        match result.unwrap_err() {
            CallError::Exhausted { last_error, .. } => {
                assert_eq!(last_error, Some(ProviderError::Timeout(Duration::from_secs(20))));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_attempts_get_only_remaining_time() {
        let calls = AtomicU32::new(0);
        let result = governor()
            .guard("Gemini", &CancellationToken::new(), || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        sleep(Duration::from_secs(15)).await;
                        Err(network_error())
                    } else {
                        sleep(Duration::from_secs(60)).await;
                        Ok("late".to_string())
                    }
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        match result.unwrap_err() {
            CallError::Exhausted {
                last_error: Some(ProviderError::Timeout(budget)),
                ..
            } => {
                assert!(budget <= Duration::from_millis(4900));
                assert!(budget >= Duration::from_millis(4800));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_attempt_after_deadline_passes_during_backoff() {
        let policy = RetryPolicy::new(3, Duration::from_millis(150));
        let calls = AtomicU32::new(0);
        let result = RetryGovernor::new(policy)
            .guard("DeepSeek", &CancellationToken::new(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    sleep(Duration::from_millis(100)).await;
                    Err::<String, _>(network_error())
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(CallError::Exhausted { attempts: 1, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_attempt_is_dropped() {
        let dropped = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(1, Duration::from_secs(1));
        let result = RetryGovernor::new(policy)
            .guard("Perplexity", &CancellationToken::new(), || {
                let flag = DropFlag(Arc::clone(&dropped));
                async move {
                    let _flag = flag;
                    sleep(Duration::from_secs(60)).await;
                    Ok::<_, ProviderError>("late".to_string())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(dropped.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_in_flight_attempt() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(2)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let result = governor()
            .guard("OpenRouter", &token, || async {
                sleep(Duration::from_secs(60)).await;
                Ok::<_, ProviderError>("late".to_string())
            })
            .await;

        assert_eq!(
            result,
            Err(CallError::Cancelled {
                provider: "OpenRouter".to_string()
            })
        );
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_makes_no_attempt() {
        let token = CancellationToken::new();
        token.cancel();
        let calls = AtomicU32::new(0);
        let result = governor()
            .guard("Grok", &token, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, ProviderError>("hola".to_string()) }
            })
            .await;

        assert!(result.unwrap_err().is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_fast_stops_on_client_error() {
        let policy = RetryPolicy::default().with_fail_fast(true);
        let calls = AtomicU32::new(0);
        let result = RetryGovernor::new(policy)
            .guard("OpenAI", &CancellationToken::new(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<String, _>(ProviderError::http("OpenAI", 401, "Invalid key")) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(CallError::Exhausted { attempts: 1, .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_errors_retried_by_default() {
        let calls = AtomicU32::new(0);
        let _ = governor()
            .guard("OpenAI", &CancellationToken::new(), || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<String, _>(ProviderError::http("OpenAI", 401, "Invalid key")) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
