//! Retry with exponential backoff for catalog page fetches
//!
//! By default a page is retried until it succeeds. A non-zero
//! `catalog.retry.max_retries` bounds the attempts, and exhaustion becomes
//! [`HearthError::PageExhausted`]. Only errors for which
//! [`HearthError::is_retryable`] holds are retried; anything else is returned
//! at once. Shutdown interrupts both in-flight attempts and backoff sleeps.

use crate::config::RetryConfig;
use crate::core::shutdown::{is_shutdown_requested, wait_for_shutdown};
use crate::domain::{HearthError, Result};
use crate::log_retry_attempt;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Backoff schedule and attempt bound
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// `None` retries forever
    pub max_attempts: Option<usize>,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: (config.max_retries > 0).then_some(config.max_retries),
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
            jitter: config.jitter,
        }
    }

    /// Unbounded policy with no delay between attempts
    pub fn immediate() -> Self {
        Self {
            max_attempts: None,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = (max_attempts > 0).then_some(max_attempts);
        self
    }

    /// Delay after the `failed_attempts`-th failure, before jitter
    pub fn delay_for(&self, failed_attempts: usize) -> Duration {
        let exponent = failed_attempts.saturating_sub(1).min(i32::MAX as usize) as i32;
        let millis = self.initial_delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let capped = millis.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(capped.max(0.0) as u64)
    }

    fn jittered_delay_for(&self, failed_attempts: usize) -> Duration {
        let base = self.delay_for(failed_attempts);
        if !self.jitter || base.is_zero() {
            return base;
        }
        let factor = rand::thread_rng().gen_range(0.75..=1.25);
        Duration::try_from_secs_f64(base.as_secs_f64() * factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Value produced by a retried operation and the attempts it took
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOutcome<T> {
    pub value: T,
    pub attempts: usize,
}

/// Run `operation` until it succeeds
///
/// # Errors
///
/// - [`HearthError::Cancelled`] once `shutdown` reads `true`, or when the
///   operation itself reports cancellation
/// - [`HearthError::PageExhausted`] when the policy's attempt bound is reached
/// - the operation's own error when it is not retryable
pub async fn retry_until_success<T, F, Fut>(
    policy: &RetryPolicy,
    shutdown: &watch::Receiver<bool>,
    page: u32,
    mut operation: F,
) -> Result<RetryOutcome<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempts = 0usize;

    loop {
        if is_shutdown_requested(shutdown) {
            return Err(HearthError::Cancelled);
        }

        attempts += 1;
        let result = tokio::select! {
            result = operation() => result,
            _ = wait_for_shutdown(shutdown.clone()) => return Err(HearthError::Cancelled),
        };

        let error = match result {
            Ok(value) => return Ok(RetryOutcome { value, attempts }),
            Err(e) if !e.is_retryable() => {
                if !matches!(e, HearthError::Cancelled) {
                    tracing::error!(page, attempts, error = %e, "Page failed with a non-retryable error");
                }
                return Err(e);
            }
            Err(e) => e,
        };

        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                tracing::error!(page, attempts, error = %error, "Giving up on page");
                return Err(HearthError::PageExhausted {
                    page,
                    attempts,
                    last_error: error.to_string(),
                });
            }
        }

        let delay = policy.jittered_delay_for(attempts);
        log_retry_attempt!(page, attempts, delay.as_millis() as u64, error);

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = wait_for_shutdown(shutdown.clone()) => return Err(HearthError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shutdown;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn policy(initial_ms: u64, max_ms: u64, multiplier: f64) -> RetryPolicy {
        RetryPolicy {
            max_attempts: None,
            initial_delay: Duration::from_millis(initial_ms),
            max_delay: Duration::from_millis(max_ms),
            backoff_multiplier: multiplier,
            jitter: false,
        }
    }

    #[test]
    fn test_delay_grows_exponentially_and_caps() {
        let p = policy(100, 1000, 2.0);
        assert_eq!(p.delay_for(1), Duration::from_millis(100));
        assert_eq!(p.delay_for(2), Duration::from_millis(200));
        assert_eq!(p.delay_for(3), Duration::from_millis(400));
        assert_eq!(p.delay_for(5), Duration::from_millis(1000));
        assert_eq!(p.delay_for(500), Duration::from_millis(1000));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let mut p = policy(1000, 10_000, 1.0);
        p.jitter = true;
        for _ in 0..200 {
            let d = p.jittered_delay_for(1);
            assert!(d >= Duration::from_millis(750) && d <= Duration::from_millis(1250));
        }
    }

    #[test]
    fn test_from_config_zero_means_unbounded() {
        let config = RetryConfig::default();
        assert_eq!(RetryPolicy::from_config(&config).max_attempts, None);

        let bounded = RetryConfig {
            max_retries: 4,
            ..RetryConfig::default()
        };
        assert_eq!(RetryPolicy::from_config(&bounded).max_attempts, Some(4));
    }

    #[test]
    fn test_jitter_near_duration_limit_is_capped() {
        let p = RetryPolicy {
            max_attempts: None,
            initial_delay: Duration::MAX,
            max_delay: Duration::MAX,
            backoff_multiplier: 2.0,
            jitter: true,
        };
        for _ in 0..50 {
            assert!(!p.jittered_delay_for(3).is_zero());
        }
    }

    #[tokio::test]
    async fn test_fails_twice_then_succeeds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let outcome = retry_until_success(&RetryPolicy::immediate(), &shutdown::never(), 1, || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(HearthError::Transport(format!("attempt {n} failed")))
                } else {
                    Ok("page")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(outcome.value, "page");
        assert_eq!(outcome.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_bounded_policy_exhausts() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let p = RetryPolicy::immediate().with_max_attempts(2);

        let err = retry_until_success(&p, &shutdown::never(), 7, || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(HearthError::HttpStatus {
                    status: 503,
                    url: "http://x".to_string(),
                })
            }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        match err {
            HearthError::PageExhausted {
                page,
                attempts,
                last_error,
            } => {
                assert_eq!(page, 7);
                assert_eq!(attempts, 2);
                assert!(last_error.contains("503"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_configuration_error_is_not_retried() {
        let calls = AtomicUsize::new(0);
        let p = RetryPolicy::immediate().with_max_attempts(5);

        let err = retry_until_success(&p, &shutdown::never(), 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(HearthError::Configuration("Invalid catalog URL".to_string())) }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, HearthError::Configuration(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_decode_error_is_retried() {
        let calls = AtomicUsize::new(0);
        let p = RetryPolicy::immediate().with_max_attempts(3);

        let err = retry_until_success(&p, &shutdown::never(), 2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(HearthError::Decode("truncated".to_string())) }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, HearthError::PageExhausted { attempts: 3, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_shutdown_before_first_attempt() {
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        let calls = AtomicUsize::new(0);
        let err = retry_until_success(&RetryPolicy::immediate(), &rx, 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await
        .unwrap_err();

        assert!(matches!(err, HearthError::Cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_backoff_sleep() {
        let (tx, rx) = watch::channel(false);
        let p = policy(60_000, 60_000, 1.0);

        let handle = tokio::spawn(async move {
            retry_until_success(&p, &rx, 1, || async {
                Err::<(), _>(HearthError::Transport("down".to_string()))
            })
            .await
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("retry loop should stop promptly")
            .unwrap();
        assert!(matches!(result, Err(HearthError::Cancelled)));
    }
}
