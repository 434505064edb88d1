use std::future::Future;
use std::time::Duration;

pub const MAX_ATTEMPTS: u32 = 3;
pub const BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BASE_DELAY,
        }
    }
}

impl BackoffPolicy {
    /// Delay before the attempt following `attempt` (zero based): base * 2^attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Runs `op` until it succeeds, fails with an error `should_retry` rejects, or
/// the attempts run out. The last error is returned in the latter two cases.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    policy: BackoffPolicy,
    should_retry: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if should_retry(&err) && attempt + 1 < attempts => {
                let delay = policy.delay_for(attempt);
                log::warn!(
                    "Rate limit hit, retrying in {}ms... (attempt {}/{}): {}",
                    delay.as_millis(),
                    attempt + 1,
                    attempts,
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
