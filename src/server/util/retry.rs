//! Bounded retry with exponential backoff for transactional operations.
//!
//! Read-modify-write sequences against a shared document (a cart, a product's
//! stock fields) are not atomic at the granularity of "load → mutate → save".
//! The storage transaction serializes concurrent writers; when it reports
//! transient contention the whole operation is re-run from a fresh read.
//! Classification of "transient" is a plain function so each storage backend
//! can plug in its own markers.

use std::future::Future;
use std::time::Duration;

use crate::server::error::AppError;

/// Retry budget for a transactional operation.
///
/// `max_attempts` counts total attempts, not retries: the default of 3 means
/// one initial attempt plus up to two re-runs. The delay doubles after each
/// failed attempt starting from `base_delay`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Backoff before the next attempt, given the number of attempts already
    /// made (1-based).
    fn delay_after(&self, attempts_made: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempts_made.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(50))
    }
}

/// Classifies errors raised by the SQLite backend as transient or fatal.
///
/// SQLite reports write contention as "database is locked" / "database table
/// is locked" busy errors; those resolve themselves once the competing
/// transaction finishes. Everything else (validation, not-found, duplicate
/// key) is deterministic and must not be retried.
pub fn sqlite_busy(err: &AppError) -> bool {
    match err {
        AppError::DbErr(db_err) => {
            let msg = db_err.to_string();
            msg.contains("database is locked")
                || msg.contains("database table is locked")
                || msg.contains("busy")
        }
        _ => false,
    }
}

/// Runs `op` until it succeeds, fails fatally, or exhausts the retry budget.
///
/// `op` is invoked fresh for every attempt so each retry re-reads current
/// state. Errors the classifier deems transient trigger a backoff and a
/// re-run; all other errors surface immediately. When the budget runs out
/// the last transient error is wrapped in [`AppError::Retryable`] so the
/// HTTP layer answers with a generic "try again" response.
///
/// # Arguments
/// - `policy` - Attempt budget and backoff base
/// - `is_transient` - Backend-specific error classifier
/// - `op` - Operation producing a fresh future per attempt
///
/// # Returns
/// - `Ok(T)` - The first successful attempt's value
/// - `Err(AppError::Retryable)` - Budget exhausted on transient errors
/// - `Err(AppError)` - First non-transient error, unchanged
pub async fn retry_on_transient<T, Fut, Op>(
    policy: RetryPolicy,
    is_transient: fn(&AppError) -> bool,
    mut op: Op,
) -> Result<T, AppError>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if is_transient(&err) => {
                if attempts >= policy.max_attempts {
                    return Err(AppError::Retryable(err.to_string()));
                }

                let delay = policy.delay_after(attempts);
                tracing::warn!(
                    "Transient store error (attempt {}/{}), retrying in {:?}: {}",
                    attempts,
                    policy.max_attempts,
                    delay,
                    err
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1))
    }

    /// Treats `Retryable`-tagged test errors as transient.
    fn test_classifier(err: &AppError) -> bool {
        matches!(err, AppError::Internal(msg) if msg == "contended")
    }

    /// Tests that a successful operation runs exactly once.
    ///
    /// Expected: Ok on the first attempt, no retries.
    #[tokio::test]
    async fn succeeds_without_retry() {
        let calls = AtomicU32::new(0);

        let result = retry_on_transient(fast_policy(), test_classifier, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, AppError>(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Tests that transient failures are retried until success.
    ///
    /// The operation fails twice with a transient error, then succeeds on
    /// the third and final attempt within the budget.
    ///
    /// Expected: Ok with the third attempt's value after 3 calls.
    #[tokio::test]
    async fn retries_transient_until_success() {
        let calls = AtomicU32::new(0);

        let result = retry_on_transient(fast_policy(), test_classifier, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(AppError::Internal("contended".to_string()))
                } else {
                    Ok("saved")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "saved");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    /// Tests that the budget caps the number of attempts.
    ///
    /// An always-contended operation must be attempted exactly
    /// `max_attempts` times and then surface as `Retryable`.
    ///
    /// Expected: Err(Retryable) after 3 calls.
    #[tokio::test]
    async fn exhausted_budget_surfaces_retryable() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = retry_on_transient(fast_policy(), test_classifier, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::Internal("contended".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(AppError::Retryable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    /// Tests that non-transient errors abort immediately without retry.
    ///
    /// Expected: Err(NotFound) after a single call.
    #[tokio::test]
    async fn fatal_error_aborts_immediately() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = retry_on_transient(fast_policy(), test_classifier, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AppError::NotFound("cart not found".to_string())) }
        })
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Tests the backoff schedule: 50ms base doubles per attempt.
    #[test]
    fn backoff_doubles_from_base() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_after(1), Duration::from_millis(50));
        assert_eq!(policy.delay_after(2), Duration::from_millis(100));
        assert_eq!(policy.delay_after(3), Duration::from_millis(200));
    }

    /// Tests that the SQLite classifier only matches lock contention.
    #[test]
    fn sqlite_classifier_matches_lock_errors() {
        let busy = AppError::DbErr(sea_orm::DbErr::Custom(
            "database is locked".to_string(),
        ));
        let dup = AppError::Conflict("SKU already exists: A-1".to_string());

        assert!(sqlite_busy(&busy));
        assert!(!sqlite_busy(&dup));
    }
}
