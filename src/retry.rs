//! Retry logic for provider calls with failure classification.

use log::{debug, warn};
use std::future::Future;
use std::time::Duration;

use crate::provider::ProviderError;

/// HTTP status a provider returns for a request timeout.
pub const REQUEST_TIMEOUT: u16 = 408;

/// How many times a failed call is re-attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_retries: usize, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A policy that never retries.
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total number of attempts the policy allows for a single call.
    pub fn max_attempts(&self) -> usize {
        self.max_retries + 1
    }
}

/// Outcome of inspecting a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Wait for the policy delay and try again.
    Retry,
    /// Give up and surface the failure.
    Fail,
}

/// Decides whether a failure is worth another attempt.
///
/// `attempts` is the number of failures seen so far, including this one.
/// Only a provider 408 or a transport timeout is transient; everything else
/// ends the call on the first failure.
pub fn classify(error: &ProviderError, attempts: usize, policy: &RetryPolicy) -> Decision {
    let transient = match error {
        ProviderError::Api { status, .. } => *status == REQUEST_TIMEOUT,
        ProviderError::Timeout(_) => true,
        ProviderError::Other(_) => false,
    };

    if transient && attempts <= policy.max_retries {
        Decision::Retry
    } else {
        Decision::Fail
    }
}

/// Executes an async provider operation under the retry policy.
/// Returns the first success, or the failure that ended the call.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> Result<T, ProviderError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempts = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempts += 1;
                match classify(&e, attempts, policy) {
                    Decision::Retry => {
                        warn!(
                            "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                            operation_name,
                            attempts,
                            policy.max_attempts(),
                            e,
                            policy.delay.as_millis()
                        );
                        tokio::time::sleep(policy.delay).await;
                    }
                    Decision::Fail => {
                        debug!(
                            "{}: giving up after {} attempt(s): {}",
                            operation_name, attempts, e
                        );
                        return Err(e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn fast_policy(max_retries: usize) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(10))
    }

    #[test]
    fn test_classify_request_timeout_is_retryable() {
        let policy = fast_policy(3);
        let err = ProviderError::api(408, "Request Timeout");
        assert_eq!(classify(&err, 1, &policy), Decision::Retry);
        assert_eq!(classify(&err, 3, &policy), Decision::Retry);
        assert_eq!(classify(&err, 4, &policy), Decision::Fail);
    }

    #[test]
    fn test_classify_other_status_is_terminal() {
        let policy = fast_policy(3);
        for status in [400, 401, 404, 429, 500, 503] {
            let err = ProviderError::api(status, "nope");
            assert_eq!(classify(&err, 1, &policy), Decision::Fail, "status {}", status);
        }
    }

    #[test]
    fn test_classify_transport_timeout() {
        let policy = fast_policy(1);
        let err = ProviderError::Timeout("operation timed out".to_string());
        assert_eq!(classify(&err, 1, &policy), Decision::Retry);
        assert_eq!(classify(&err, 2, &policy), Decision::Fail);
    }

    #[test]
    fn test_classify_other_failure_never_retries() {
        // Even when the message mentions a timeout, only the tag counts.
        let err = ProviderError::Other(anyhow::anyhow!("mapping timeout bug"));
        assert_eq!(classify(&err, 1, &fast_policy(5)), Decision::Fail);
    }

    #[test]
    fn test_no_retry_policy() {
        let policy = RetryPolicy::none();
        assert_eq!(policy.max_attempts(), 1);
        let err = ProviderError::api(408, "Request Timeout");
        assert_eq!(classify(&err, 1, &policy), Decision::Fail);
    }

    #[tokio::test]
    async fn test_with_retry_success() {
        let result = with_retry(&fast_policy(3), "test", || async {
            Ok::<_, ProviderError>(42)
        })
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_recovers_after_request_timeout() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let result = with_retry(&fast_policy(3), "test", || {
            let attempts = Arc::clone(&attempts_clone);
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(ProviderError::api(408, "Request Timeout"))
                } else {
                    Ok("ok")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_exhausts_retries() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = Arc::clone(&attempts);
        let policy = fast_policy(2);

        let start = Instant::now();
        let result = with_retry(&policy, "test", || {
            let attempts = Arc::clone(&attempts_clone);
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ProviderError::Timeout("read timed out".to_string()))
            }
        })
        .await;

        assert!(matches!(result, Err(ProviderError::Timeout(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), policy.max_attempts());
        assert!(start.elapsed() >= policy.delay * 2);
    }

    #[tokio::test]
    async fn test_with_retry_immediate_failure_on_terminal_error() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let result = with_retry(&fast_policy(3), "test", || {
            let attempts = Arc::clone(&attempts_clone);
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ProviderError::api(404, "Resource Not Found"))
            }
        })
        .await;

        assert!(matches!(result, Err(ProviderError::Api { status: 404, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
