use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::AppError;

/// How many times a transactional operation is attempted in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Linear backoff: 5ms per prior attempt.
    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(5 * u64::from(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Re-run `op` while it fails with a retryable error and budget remains.
///
/// `op` must build a fresh transaction on every call; no state from a
/// failed attempt is carried into the next. Non-retryable errors and the
/// last retryable error are returned as-is.
pub async fn with_retry<R, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<R, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<R, AppError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "txn_retry=success");
                }
                return Ok(value);
            }
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    code = %err.code(),
                    "txn_retry=retrying"
                );
                tokio::time::sleep(policy.backoff(attempt)).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
