//! In-memory one-time login codes.
//!
//! Codes are per-destination, numeric, short-lived, and single-use. The
//! store lives in process memory behind an `RwLock`; a worker restart simply
//! invalidates outstanding codes, which the login flow tolerates by letting
//! the user request a new one.

use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Time-to-live for login codes.
const OTP_TTL: Duration = Duration::from_secs(5 * 60);

/// Number of digits in a code.
const OTP_LENGTH: u32 = 6;

/// Wrong guesses allowed before the code is discarded.
const MAX_VERIFY_ATTEMPTS: u32 = 5;

/// One outstanding code.
struct OtpCode {
    code: String,
    expires_at: Instant,
    attempts: u32,
}

impl OtpCode {
    fn new(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Instant::now() + ttl,
            attempts: 0,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Service managing one-time login codes, keyed by destination.
///
/// Issuing a new code for a destination replaces any outstanding one.
/// Verification consumes the code on success; expired codes and codes that
/// absorb too many wrong guesses are discarded.
#[derive(Clone)]
pub struct OtpService {
    codes: Arc<RwLock<HashMap<String, OtpCode>>>,
}

impl OtpService {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Issues a fresh code for the destination, replacing any previous one.
    ///
    /// # Returns
    /// - `String` - The generated numeric code
    pub async fn issue(&self, destination: &str) -> String {
        self.issue_with_ttl(destination, OTP_TTL).await
    }

    async fn issue_with_ttl(&self, destination: &str, ttl: Duration) -> String {
        let code = Self::generate_code();
        self.codes
            .write()
            .await
            .insert(destination.to_string(), OtpCode::new(code.clone(), ttl));
        code
    }

    /// Validates the supplied code for the destination.
    ///
    /// A correct, unexpired code is consumed and cannot be reused. Expired
    /// codes are removed on sight. A wrong guess counts against the
    /// attempt budget; exhausting it discards the code.
    ///
    /// # Returns
    /// - `true` - Code matched and was consumed
    /// - `false` - No code, expired, wrong, or attempt budget exhausted
    pub async fn verify_and_consume(&self, destination: &str, input: &str) -> bool {
        let mut codes = self.codes.write().await;

        let Some(stored) = codes.get_mut(destination) else {
            return false;
        };

        if stored.is_expired() {
            codes.remove(destination);
            return false;
        }

        if stored.code != input {
            stored.attempts += 1;
            if stored.attempts >= MAX_VERIFY_ATTEMPTS {
                codes.remove(destination);
            }
            return false;
        }

        codes.remove(destination);
        true
    }

    /// Discards the destination's outstanding code, if any.
    ///
    /// Used when dispatching the code fails, so a stale undeliverable code
    /// can never be guessed later.
    pub async fn invalidate(&self, destination: &str) {
        self.codes.write().await.remove(destination);
    }

    fn generate_code() -> String {
        let mut rng = rand::rng();
        let max = 10u32.pow(OTP_LENGTH);
        format!("{:0width$}", rng.random_range(0..max), width = OTP_LENGTH as usize)
    }
}

impl Default for OtpService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    /// Tests issuing a code: six digits, verifiable once.
    #[tokio::test]
    async fn issues_six_digit_code() {
        let service = OtpService::new();
        let code = service.issue("a@b.com").await;

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(service.verify_and_consume("a@b.com", &code).await);
    }

    /// Tests that a verified code is consumed and cannot be replayed.
    #[tokio::test]
    async fn code_cannot_be_reused() {
        let service = OtpService::new();
        let code = service.issue("a@b.com").await;

        assert!(service.verify_and_consume("a@b.com", &code).await);
        assert!(!service.verify_and_consume("a@b.com", &code).await);
    }

    /// Tests that a wrong guess leaves the code intact until the attempt
    /// budget runs out.
    #[tokio::test]
    async fn wrong_guesses_exhaust_attempt_budget() {
        let service = OtpService::new();
        let code = service.issue("a@b.com").await;

        for _ in 0..MAX_VERIFY_ATTEMPTS - 1 {
            assert!(!service.verify_and_consume("a@b.com", "000000").await);
        }
        // Budget not yet exhausted: the real code still works... one more
        // wrong guess would have discarded it.
        assert!(service.verify_and_consume("a@b.com", &code).await);

        let code = service.issue("a@b.com").await;
        for _ in 0..MAX_VERIFY_ATTEMPTS {
            assert!(!service.verify_and_consume("a@b.com", "000000").await);
        }
        assert!(!service.verify_and_consume("a@b.com", &code).await);
    }

    /// Tests that issuing again replaces the outstanding code.
    #[tokio::test]
    async fn reissue_replaces_previous_code() {
        let service = OtpService::new();
        let first = service.issue("a@b.com").await;
        let second = service.issue("a@b.com").await;

        if first != second {
            assert!(!service.verify_and_consume("a@b.com", &first).await);
        }
        assert!(service.verify_and_consume("a@b.com", &second).await);
    }

    /// Tests that codes expire after their TTL.
    #[tokio::test]
    async fn expired_code_fails_verification() {
        let service = OtpService::new();
        let code = service
            .issue_with_ttl("a@b.com", Duration::from_millis(10))
            .await;

        sleep(Duration::from_millis(50)).await;

        assert!(!service.verify_and_consume("a@b.com", &code).await);
    }

    /// Tests that destinations are isolated from each other.
    #[tokio::test]
    async fn destinations_are_isolated() {
        let service = OtpService::new();
        let code_a = service.issue("a@b.com").await;
        let code_c = service.issue("c@d.com").await;

        assert!(service.verify_and_consume("a@b.com", &code_a).await);
        assert!(service.verify_and_consume("c@d.com", &code_c).await);
    }

    /// Tests explicit invalidation after a failed dispatch.
    #[tokio::test]
    async fn invalidate_discards_code() {
        let service = OtpService::new();
        let code = service.issue("a@b.com").await;

        service.invalidate("a@b.com").await;

        assert!(!service.verify_and_consume("a@b.com", &code).await);
    }
}
