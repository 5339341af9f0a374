// Batch execution engine. A batch is issued fan-out via join_all and fully
// settled before the next batch starts, so the sample vector is only touched
// between batches. No cancellation, no per-request retries.

use crate::api_client::CallOutcome;
use crate::error::HarnessError;
use futures_util::future::join_all;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

fn ensure_allowed(
    endpoint: &'static str,
    status: u16,
    allowed: &[u16],
) -> Result<(), HarnessError> {
    if allowed.contains(&status) {
        Ok(())
    } else {
        Err(HarnessError::UnexpectedStatus {
            endpoint,
            status,
            allowed: allowed.to_vec(),
        })
    }
}

/// Partitions `total` requests into batches of `batch_size`, issues each batch
/// in parallel, and pauses between batches when `pause_between` is set.
/// The first response outside `allowed` fails the whole run.
pub async fn run_concurrent_batches<F, Fut>(
    endpoint: &'static str,
    total: usize,
    batch_size: usize,
    pause_between: Option<Duration>,
    allowed: &[u16],
    make_request: F,
) -> Result<Vec<Duration>, HarnessError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<CallOutcome, HarnessError>>,
{
    let mut samples = Vec::with_capacity(total);
    let mut remaining = total;
    while remaining > 0 {
        let size = remaining.min(batch_size);
        let outcomes = join_all((0..size).map(|_| make_request())).await;
        for outcome in outcomes {
            let outcome = outcome?;
            ensure_allowed(endpoint, outcome.status, allowed)?;
            samples.push(outcome.elapsed);
        }
        remaining -= size;
        if remaining > 0
            && let Some(pause) = pause_between
        {
            tokio::time::sleep(pause).await;
        }
    }
    Ok(samples)
}

/// Issues `iterations` requests one at a time.
pub async fn run_sequential<F, Fut>(
    endpoint: &'static str,
    iterations: usize,
    allowed: &[u16],
    make_request: F,
) -> Result<Vec<Duration>, HarnessError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<CallOutcome, HarnessError>>,
{
    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let outcome = make_request().await?;
        ensure_allowed(endpoint, outcome.status, allowed)?;
        samples.push(outcome.elapsed);
    }
    Ok(samples)
}

/// Issues fixed-size parallel bursts back to back until `duration` of
/// wall-clock time has elapsed. A burst started before the deadline is
/// always awaited to completion.
pub async fn run_sustained<F, Fut>(
    endpoint: &'static str,
    duration: Duration,
    burst_size: usize,
    allowed: &[u16],
    make_request: F,
) -> Result<Vec<Duration>, HarnessError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<CallOutcome, HarnessError>>,
{
    let deadline = Instant::now() + duration;
    let mut samples = Vec::new();
    while Instant::now() < deadline {
        let outcomes = join_all((0..burst_size).map(|_| make_request())).await;
        for outcome in outcomes {
            let outcome = outcome?;
            ensure_allowed(endpoint, outcome.status, allowed)?;
            samples.push(outcome.elapsed);
        }
    }
    Ok(samples)
}

/// One request whose status must match exactly (error-path timing).
pub async fn run_single<F, Fut>(
    endpoint: &'static str,
    expected_status: u16,
    make_request: F,
) -> Result<Duration, HarnessError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<CallOutcome, HarnessError>>,
{
    let outcome = make_request().await?;
    ensure_allowed(endpoint, outcome.status, &[expected_status])?;
    Ok(outcome.elapsed)
}
