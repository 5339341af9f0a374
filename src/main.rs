use anyhow::Result;
use loadbench::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %app_config.target.base_url,
        "starting load run"
    );

    let client = api_client::ApiClient::new(&app_config.target.base_url)?;
    readiness::wait_for_server(
        &client,
        app_config.target.readiness_attempts,
        app_config.target.readiness_backoff(),
    )
    .await?;
    readiness::login_smoke_check(&client).await?;

    let monitor = resource_monitor::ResourceMonitor::new()?;

    let report = tokio::time::timeout(
        app_config.target.suite_timeout(),
        scenarios::run_all(&client, &monitor, &app_config),
    )
    .await
    .map_err(|_| {
        anyhow::anyhow!(
            "suite timeout after {}s",
            app_config.target.suite_timeout_secs
        )
    })?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.all_passed() {
        tracing::info!(scenarios = report.scenarios.len() + 1, "all scenarios passed");
        Ok(())
    } else {
        anyhow::bail!("{} scenario(s) failed", report.failed_count())
    }
}
