//! Per-attempt timeouts with one escalating retry
//!
//! Both geodata lookups share the same shape: try with a deadline, on any
//! failure try again with a longer one, then give up and let the caller fall
//! back to a default. [`with_timeout_escalation`] is that loop.

use super::{LookupError, Resolution};
use std::future::Future;
use std::time::Duration;

/// Ordered per-attempt deadlines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutPolicy {
    attempts: Vec<Duration>,
}

impl TimeoutPolicy {
    /// One attempt, no retry
    pub fn single(limit: Duration) -> Self {
        Self {
            attempts: vec![limit],
        }
    }

    /// A fast attempt, then one retry with a longer deadline
    pub fn escalating(first: Duration, retry: Duration) -> Self {
        Self {
            attempts: vec![first, retry],
        }
    }

    /// Deadlines in the order they are tried
    pub fn attempts(&self) -> &[Duration] {
        &self.attempts
    }
}

/// Run `call` under each deadline of `policy` until one attempt succeeds
///
/// Failed and timed-out attempts are logged. A fresh future is built for
/// every attempt, so `call` must be re-invocable.
///
/// # Errors
/// The last attempt's error ([`LookupError::Timeout`] for a deadline miss),
/// or [`LookupError::Unavailable`] for an empty policy
pub async fn with_timeout_escalation<T, F, Fut>(
    policy: &TimeoutPolicy,
    what: &'static str,
    mut call: F,
) -> Result<T, LookupError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LookupError>>,
{
    let mut last_error = LookupError::Unavailable;

    for (attempt, &limit) in policy.attempts().iter().enumerate() {
        tracing::debug!(lookup = what, attempt = attempt + 1, ?limit, "Lookup attempt");
        match tokio::time::timeout(limit, call()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(err)) => {
                tracing::warn!(lookup = what, attempt = attempt + 1, error = %err, "Lookup failed");
                last_error = err;
            }
            Err(_) => {
                tracing::warn!(lookup = what, attempt = attempt + 1, ?limit, "Lookup timed out");
                last_error = LookupError::Timeout(limit);
            }
        }
    }

    Err(last_error)
}

/// [`with_timeout_escalation`], falling back to `default` once every attempt fails
pub async fn resolve_or_default<T, F, Fut>(
    policy: &TimeoutPolicy,
    what: &'static str,
    default: T,
    call: F,
) -> Resolution<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LookupError>>,
{
    match with_timeout_escalation(policy, what, call).await {
        Ok(value) => Resolution::Resolved(value),
        Err(err) => {
            tracing::warn!(lookup = what, error = %err, "Using default after failed lookup");
            Resolution::Defaulted {
                value: default,
                reason: err,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let calls = AtomicUsize::new(0);
        let policy = TimeoutPolicy::escalating(Duration::from_millis(200), Duration::from_millis(400));
        let result = with_timeout_escalation(&policy, "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, LookupError>(7) }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_after_timeout() {
        let calls = AtomicUsize::new(0);
        let policy = TimeoutPolicy::escalating(Duration::from_millis(20), Duration::from_millis(500));
        let result = with_timeout_escalation(&policy, "test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                }
                Ok::<_, LookupError>(n)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_policy_exhausted() {
        let calls = AtomicUsize::new(0);
        let policy = TimeoutPolicy::escalating(Duration::from_millis(50), Duration::from_millis(50));
        let result: Result<u32, _> = with_timeout_escalation(&policy, "test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(LookupError::Status(503)) }
        })
        .await;
        assert_eq!(result.unwrap_err(), LookupError::Status(503));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_default_reports_reason() {
        let policy = TimeoutPolicy::single(Duration::from_millis(10));
        let resolution = resolve_or_default(&policy, "test", false, || async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(true)
        })
        .await;
        assert!(resolution.is_defaulted());
        assert!(!resolution.into_value());
    }

    #[tokio::test]
    async fn test_empty_policy_is_unavailable() {
        let policy = TimeoutPolicy { attempts: Vec::new() };
        let result: Result<(), _> =
            with_timeout_escalation(&policy, "test", || async { Ok(()) }).await;
        assert_eq!(result.unwrap_err(), LookupError::Unavailable);
    }
}
