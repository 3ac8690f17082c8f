use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Exponential backoff schedule for retried operations
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: u32,
    /// Scale each delay into 50%..100% of its nominal value
    pub jitter: bool,
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Total attempts including the first one
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Nominal delay before retry number `retry` (1-based), capped at `max_delay`
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self
            .multiplier
            .max(1)
            .saturating_pow(retry.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    /// 5 retries starting at 200ms, doubling up to 5s
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            multiplier: 2,
            jitter: true,
        }
    }
}

/// Run `operation` until it succeeds or the policy is exhausted, returning the last error
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retry = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if retry > 0 {
                    debug!(operation = operation_name, retries = retry, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) if retry >= policy.max_retries => {
                warn!(
                    operation = operation_name,
                    attempts = policy.attempts(),
                    error = %e,
                    "Giving up"
                );
                return Err(e);
            }
            Err(e) => {
                retry += 1;
                let nominal = policy.delay_for(retry);
                let delay = if policy.jitter { jittered(nominal) } else { nominal };

                debug!(
                    operation = operation_name,
                    retry,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn jittered(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = 50 + (RandomState::new().hash_one(std::time::SystemTime::now()) % 51) as u32;
    delay * percent / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_retries(max_retries)
            .with_initial_delay(Duration::from_millis(5))
            .without_jitter()
    }

    #[tokio::test]
    async fn test_first_attempt_success_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = retry_with_backoff(&fast_policy(3), "probe", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("up")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "up");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = retry_with_backoff(&fast_policy(3), "probe", || {
            let counter = counter.clone();
            async move {
                match counter.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => Err("refused".to_string()),
                    _ => Ok(7),
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = retry_with_backoff(&fast_policy(2), "probe", || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(format!("refused #{}", n + 1))
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), "refused #3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(350));

        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(350));
        assert_eq!(policy.delay_for(40), Duration::from_millis(350));
    }

    #[test]
    fn test_jitter_stays_within_half_to_full() {
        for _ in 0..20 {
            let delay = jittered(Duration::from_millis(1000));
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }
}
