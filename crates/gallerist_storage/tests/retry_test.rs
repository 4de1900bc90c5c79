//! Tests for the retry executor.

use gallerist_storage::{run_with_retry, RetryPolicy};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn success_on_first_attempt_waits_nothing() {
    let attempts = AtomicU32::new(0);
    let start = tokio::time::Instant::now();

    let result: Result<u32, String> = run_with_retry(RetryPolicy::default(), || {
        attempts.fetch_add(1, Ordering::SeqCst);
        async { Ok(42) }
    })
    .await;

    assert_eq!(result, Ok(42));
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn recovers_after_transient_failures_with_doubling_waits() {
    let attempts = AtomicU32::new(0);
    let start = tokio::time::Instant::now();
    let policy = RetryPolicy::new(5, Duration::from_millis(1000));

    let result: Result<u32, String> = run_with_retry(policy, || {
        let n = attempts.fetch_add(1, Ordering::SeqCst);
        async move {
            if n < 2 {
                Err(format!("transient {}", n))
            } else {
                Ok(7)
            }
        }
    })
    .await;

    assert_eq!(result, Ok(7));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    // Two failures: waits of 1000ms then 2000ms.
    assert_eq!(start.elapsed(), Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn exhaustion_returns_the_last_error() {
    let attempts = AtomicU32::new(0);
    let start = tokio::time::Instant::now();
    let policy = RetryPolicy::new(3, Duration::from_millis(1000));

    let result: Result<(), String> = run_with_retry(policy, || {
        let n = attempts.fetch_add(1, Ordering::SeqCst);
        async move { Err(format!("attempt {}", n)) }
    })
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(result, Err("attempt 2".to_string()));
    // Exactly two waits before giving up: 1000ms + 2000ms.
    assert_eq!(start.elapsed(), Duration::from_millis(3000));
}

#[tokio::test]
async fn single_attempt_policy_never_retries() {
    let attempts = AtomicU32::new(0);
    let policy = RetryPolicy::new(1, Duration::from_secs(60));

    let result: Result<(), &str> = run_with_retry(policy, || {
        attempts.fetch_add(1, Ordering::SeqCst);
        async { Err("nope") }
    })
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(result, Err("nope"));
}
