// Batch engine tests against fabricated request outcomes (no network).

use loadbench::api_client::CallOutcome;
use loadbench::error::HarnessError;
use loadbench::runner;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn outcome(status: u16) -> Result<CallOutcome, HarnessError> {
    Ok(CallOutcome {
        status,
        elapsed: Duration::from_millis(5),
    })
}

#[tokio::test]
async fn test_concurrent_batches_collects_all_samples() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let samples = runner::run_concurrent_batches("/login/", 10, 4, None, &[200, 429], move || {
        let c = c.clone();
        async move {
            // Every third response is rate-limited; both codes are allowed.
            let n = c.fetch_add(1, Ordering::SeqCst);
            outcome(if n % 3 == 0 { 429 } else { 200 })
        }
    })
    .await
    .expect("batches");
    assert_eq!(samples.len(), 10);
    assert_eq!(calls.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_concurrent_batches_pause_between_batches() {
    let started = std::time::Instant::now();
    let samples = runner::run_concurrent_batches(
        "/feedback/",
        10,
        4,
        Some(Duration::from_millis(50)),
        &[200],
        || async { outcome(200) },
    )
    .await
    .expect("batches");
    assert_eq!(samples.len(), 10);
    // 3 batches means 2 inter-batch pauses.
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn test_concurrent_batches_rejects_disallowed_status() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let err = runner::run_concurrent_batches("/login/", 8, 4, None, &[200, 429], move || {
        let c = c.clone();
        async move {
            let n = c.fetch_add(1, Ordering::SeqCst);
            outcome(if n == 5 { 500 } else { 200 })
        }
    })
    .await
    .unwrap_err();
    match err {
        HarnessError::UnexpectedStatus { status, .. } => assert_eq!(status, 500),
        other => panic!("expected UnexpectedStatus, got {other}"),
    }
}

#[tokio::test]
async fn test_sequential_runs_one_at_a_time() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let f = in_flight.clone();
    let samples = runner::run_sequential("/login/", 10, &[200], move || {
        let f = f.clone();
        async move {
            assert_eq!(f.fetch_add(1, Ordering::SeqCst), 0, "overlapping requests");
            tokio::time::sleep(Duration::from_millis(1)).await;
            f.fetch_sub(1, Ordering::SeqCst);
            outcome(200)
        }
    })
    .await
    .expect("sequential");
    assert_eq!(samples.len(), 10);
}

#[tokio::test]
async fn test_sustained_runs_whole_bursts_until_deadline() {
    let samples = runner::run_sustained(
        "/login/",
        Duration::from_millis(50),
        3,
        &[200],
        || async {
            tokio::time::sleep(Duration::from_millis(2)).await;
            outcome(200)
        },
    )
    .await
    .expect("sustained");
    assert!(!samples.is_empty());
    assert_eq!(samples.len() % 3, 0, "bursts are never cut short");
}

#[tokio::test]
async fn test_single_requires_exact_status() {
    let elapsed = runner::run_single("/auth/", 403, || async { outcome(403) })
        .await
        .expect("single");
    assert_eq!(elapsed, Duration::from_millis(5));

    let err = runner::run_single("/auth/", 403, || async { outcome(200) })
        .await
        .unwrap_err();
    match err {
        HarnessError::UnexpectedStatus { status, allowed, .. } => {
            assert_eq!(status, 200);
            assert_eq!(allowed, vec![403]);
        }
        other => panic!("expected UnexpectedStatus, got {other}"),
    }
}
