// The load scenarios. Each produces a ScenarioReport; a failure (unexpected
// status, transport error, threshold breach) marks that report failed and the
// run moves on to the next scenario.

use crate::api_client::ApiClient;
use crate::config::{AppConfig, MonitoringConfig, ScenariosConfig};
use crate::error::HarnessError;
use crate::models::{ResourceReport, RunReport, ScenarioReport};
use crate::resource_monitor::ResourceMonitor;
use crate::{runner, stats};
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

/// Load endpoints may legitimately shed excess requests with 429.
const ALLOWED_UNDER_LOAD: &[u16] = &[200, 429];

fn report(
    name: &'static str,
    threshold_ms: u64,
    requested: usize,
    result: Result<Vec<Duration>, HarnessError>,
) -> ScenarioReport {
    match result.and_then(|samples| stats::summarize(&samples).ok_or(HarnessError::NoSamples)) {
        Ok(summary) => {
            let passed = summary.mean_ms < threshold_ms as f64;
            info!(
                scenario = name,
                mean_ms = summary.mean_ms,
                samples = summary.count,
                requested,
                threshold_ms,
                passed,
                "scenario finished"
            );
            ScenarioReport {
                name: name.into(),
                passed,
                threshold_ms,
                requested,
                latency: Some(summary),
                detail: None,
            }
        }
        Err(e) => {
            warn!(scenario = name, error = %e, "scenario failed");
            ScenarioReport {
                name: name.into(),
                passed: false,
                threshold_ms,
                requested,
                latency: None,
                detail: Some(e.to_string()),
            }
        }
    }
}

/// N concurrent feedback submissions in batches, with a pause between batches.
pub async fn concurrent_feedback(client: &ApiClient, cfg: &ScenariosConfig) -> ScenarioReport {
    let result = runner::run_concurrent_batches(
        "/feedback/",
        cfg.concurrent_users,
        cfg.batch_size,
        Some(cfg.inter_batch_pause()),
        ALLOWED_UNDER_LOAD,
        || {
            let name = format!("test{}", rand::thread_rng().gen_range(0..1000));
            async move { client.submit_feedback(&name, "test").await }
        },
    )
    .await;
    report(
        "concurrent_feedback",
        cfg.feedback_mean_ceiling_ms,
        cfg.concurrent_users,
        result,
    )
}

/// N logins issued one at a time.
pub async fn sequential_login(client: &ApiClient, cfg: &ScenariosConfig) -> ScenarioReport {
    let result = runner::run_sequential(
        "/login/",
        cfg.sequential_iterations,
        ALLOWED_UNDER_LOAD,
        || client.login("test", "test"),
    )
    .await;
    report(
        "sequential_login",
        cfg.sequential_login_mean_ceiling_ms,
        cfg.sequential_iterations,
        result,
    )
}

/// N concurrent logins in batches, back to back (no inter-batch pause).
pub async fn concurrent_login(client: &ApiClient, cfg: &ScenariosConfig) -> ScenarioReport {
    let result = runner::run_concurrent_batches(
        "/login/",
        cfg.concurrent_users,
        cfg.batch_size,
        None,
        ALLOWED_UNDER_LOAD,
        || client.login("test", "test"),
    )
    .await;
    report(
        "concurrent_login",
        cfg.concurrent_login_mean_ceiling_ms,
        cfg.concurrent_users,
        result,
    )
}

/// Fixed-size login bursts for the full sustained-load window.
pub async fn sustained_login(client: &ApiClient, cfg: &ScenariosConfig) -> ScenarioReport {
    let result = runner::run_sustained(
        "/login/",
        cfg.sustained_duration(),
        cfg.sustained_burst_size,
        ALLOWED_UNDER_LOAD,
        || client.login("test", "test"),
    )
    .await;
    report(
        "sustained_login",
        cfg.sustained_mean_ceiling_ms,
        0,
        result,
    )
}

/// Bad credentials must be rejected with exactly 403, and quickly: auth
/// failures are expected to short-circuit before any expensive work.
pub async fn invalid_login(client: &ApiClient, cfg: &ScenariosConfig) -> ScenarioReport {
    let result = runner::run_single("/login/", 403, || client.login("invalid", "invalid"))
        .await
        .map(|sample| vec![sample]);
    report("invalid_login", cfg.invalid_login_ceiling_ms, 1, result)
}

/// A bogus bearer token must be rejected with exactly 403, even faster.
pub async fn invalid_token(client: &ApiClient, cfg: &ScenariosConfig) -> ScenarioReport {
    let result = runner::run_single("/auth/", 403, || client.auth("invalid_token"))
        .await
        .map(|sample| vec![sample]);
    report("invalid_token", cfg.invalid_token_ceiling_ms, 1, result)
}

/// Samples CPU load average and process memory once per interval for the
/// monitoring window, then judges mean CPU and peak memory.
pub async fn resource_usage(monitor: &ResourceMonitor, cfg: &MonitoringConfig) -> ResourceReport {
    match monitor.sample_window(cfg.window(), cfg.sample_interval()).await {
        Ok(samples) => {
            let report =
                ResourceReport::from_samples(&samples, cfg.cpu_load_ceiling, cfg.memory_ceiling_mb);
            info!(
                samples = report.samples,
                mean_cpu_load = report.mean_cpu_load,
                peak_memory_mb = report.peak_memory_mb,
                passed = report.passed,
                "resource window finished"
            );
            report
        }
        Err(e) => {
            warn!(error = %e, "resource sampling failed");
            ResourceReport {
                passed: false,
                samples: 0,
                mean_cpu_load: 0.0,
                peak_memory_mb: 0.0,
                cpu_load_ceiling: cfg.cpu_load_ceiling,
                memory_ceiling_mb: cfg.memory_ceiling_mb,
                detail: Some(e.to_string()),
            }
        }
    }
}

/// Runs every scenario in order. Failures never abort siblings.
pub async fn run_all(
    client: &ApiClient,
    monitor: &ResourceMonitor,
    config: &AppConfig,
) -> RunReport {
    let scenarios = vec![
        concurrent_feedback(client, &config.scenarios).await,
        sequential_login(client, &config.scenarios).await,
        concurrent_login(client, &config.scenarios).await,
        sustained_login(client, &config.scenarios).await,
        invalid_login(client, &config.scenarios).await,
        invalid_token(client, &config.scenarios).await,
    ];
    let resources = resource_usage(monitor, &config.monitoring).await;
    RunReport { scenarios, resources }
}
