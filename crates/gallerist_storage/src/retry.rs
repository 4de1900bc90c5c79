//! Bounded exponential-backoff retry executor.

use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};

/// Backoff schedule for a retried operation.
///
/// The first retry waits `initial_delay`, and each subsequent retry doubles
/// the previous delay. No jitter is applied and the delay is uncapped; with
/// the default policy an operation is attempted at most 3 times, waiting 1s
/// and then 2s between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and initial delay.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// The inter-attempt delays this policy produces.
    fn delays(&self) -> std::iter::Take<DoublingDelay> {
        DoublingDelay {
            delay: self.initial_delay,
        }
        .take(self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Unbounded doubling-delay iterator; bounded by `Take` in [`RetryPolicy`].
#[derive(Debug, Clone, Copy)]
struct DoublingDelay {
    delay: Duration,
}

impl Iterator for DoublingDelay {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.delay;
        self.delay = current.saturating_mul(2);
        Some(current)
    }
}

/// Run a fallible async operation under a retry policy.
///
/// The operation is attempted up to `policy.max_attempts` times, sleeping
/// between attempts per the policy's doubling schedule. Every failure is
/// treated as transient; when the budget is exhausted the LAST error is
/// returned unchanged. Each call gets its own fresh budget, so wrapping the
/// record insert, blob upload, and record update separately gives each step
/// independent recovery.
///
/// # Examples
///
/// ```
/// use gallerist_storage::{run_with_retry, RetryPolicy};
/// use std::time::Duration;
///
/// # async fn example() {
/// let policy = RetryPolicy::new(3, Duration::from_millis(10));
/// let result: Result<u32, &str> = run_with_retry(policy, || async { Ok(7) }).await;
/// assert_eq!(result, Ok(7));
/// # }
/// ```
pub async fn run_with_retry<T, E, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retry::spawn(policy.delays(), move || {
        let attempt = operation();
        async move {
            attempt.await.map_err(|err| RetryError::Transient {
                err,
                retry_after: None,
            })
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_three_attempts_from_one_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_millis(1000));
    }

    #[test]
    fn delays_double_and_stop_before_the_last_attempt() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        let delays: Vec<_> = policy.delays().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
            ]
        );
    }

    #[test]
    fn single_attempt_policy_has_no_delays() {
        let policy = RetryPolicy::new(1, Duration::from_secs(1));
        assert_eq!(policy.delays().count(), 0);
    }
}
