use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub target: TargetConfig,
    pub scenarios: ScenariosConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL of the API under test.
    pub base_url: String,
    /// Max status-probe attempts before the run is aborted.
    pub readiness_attempts: u32,
    pub readiness_backoff_ms: u64,
    /// Wall-clock ceiling for the whole run; exceeding it aborts everything.
    pub suite_timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".into(),
            readiness_attempts: 5,
            readiness_backoff_ms: 1000,
            suite_timeout_secs: 30 * 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScenariosConfig {
    pub concurrent_users: usize,
    pub batch_size: usize,
    /// Pause between feedback batches (the login batches run back to back).
    pub inter_batch_pause_ms: u64,
    pub sequential_iterations: usize,
    pub sustained_duration_secs: u64,
    pub sustained_burst_size: usize,
    pub feedback_mean_ceiling_ms: u64,
    pub sequential_login_mean_ceiling_ms: u64,
    pub concurrent_login_mean_ceiling_ms: u64,
    pub sustained_mean_ceiling_ms: u64,
    pub invalid_login_ceiling_ms: u64,
    pub invalid_token_ceiling_ms: u64,
}

impl Default for ScenariosConfig {
    fn default() -> Self {
        Self {
            concurrent_users: 1000,
            batch_size: 50,
            inter_batch_pause_ms: 1000,
            sequential_iterations: 1000,
            sustained_duration_secs: 10 * 60,
            sustained_burst_size: 10,
            feedback_mean_ceiling_ms: 2000,
            sequential_login_mean_ceiling_ms: 500,
            concurrent_login_mean_ceiling_ms: 1000,
            sustained_mean_ceiling_ms: 1000,
            invalid_login_ceiling_ms: 200,
            invalid_token_ceiling_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub window_secs: u64,
    pub sample_interval_ms: u64,
    /// Ceiling for the mean 1-minute load average over the window.
    pub cpu_load_ceiling: f64,
    /// Ceiling for peak resident memory of this process, in MB.
    pub memory_ceiling_mb: f64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            window_secs: 30,
            sample_interval_ms: 1000,
            cpu_load_ceiling: 80.0,
            memory_ceiling_mb: 1024.0,
        }
    }
}

impl AppConfig {
    /// Loads from CONFIG_FILE (default "config.toml"); a missing file means defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path, "no config file, using defaults");
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.target.base_url.is_empty(),
            "target.base_url must be non-empty"
        );
        anyhow::ensure!(
            self.target.readiness_attempts > 0,
            "target.readiness_attempts must be > 0, got {}",
            self.target.readiness_attempts
        );
        anyhow::ensure!(
            self.target.suite_timeout_secs > 0,
            "target.suite_timeout_secs must be > 0, got {}",
            self.target.suite_timeout_secs
        );
        anyhow::ensure!(
            self.scenarios.concurrent_users > 0,
            "scenarios.concurrent_users must be > 0, got {}",
            self.scenarios.concurrent_users
        );
        anyhow::ensure!(
            self.scenarios.batch_size > 0,
            "scenarios.batch_size must be > 0, got {}",
            self.scenarios.batch_size
        );
        anyhow::ensure!(
            self.scenarios.sequential_iterations > 0,
            "scenarios.sequential_iterations must be > 0, got {}",
            self.scenarios.sequential_iterations
        );
        anyhow::ensure!(
            self.scenarios.sustained_duration_secs > 0,
            "scenarios.sustained_duration_secs must be > 0, got {}",
            self.scenarios.sustained_duration_secs
        );
        anyhow::ensure!(
            self.scenarios.sustained_burst_size > 0,
            "scenarios.sustained_burst_size must be > 0, got {}",
            self.scenarios.sustained_burst_size
        );
        anyhow::ensure!(
            self.monitoring.window_secs > 0,
            "monitoring.window_secs must be > 0, got {}",
            self.monitoring.window_secs
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.cpu_load_ceiling > 0.0,
            "monitoring.cpu_load_ceiling must be > 0, got {}",
            self.monitoring.cpu_load_ceiling
        );
        anyhow::ensure!(
            self.monitoring.memory_ceiling_mb > 0.0,
            "monitoring.memory_ceiling_mb must be > 0, got {}",
            self.monitoring.memory_ceiling_mb
        );
        Ok(())
    }
}

impl TargetConfig {
    pub fn readiness_backoff(&self) -> Duration {
        Duration::from_millis(self.readiness_backoff_ms)
    }

    pub fn suite_timeout(&self) -> Duration {
        Duration::from_secs(self.suite_timeout_secs)
    }
}

impl ScenariosConfig {
    pub fn inter_batch_pause(&self) -> Duration {
        Duration::from_millis(self.inter_batch_pause_ms)
    }

    pub fn sustained_duration(&self) -> Duration {
        Duration::from_secs(self.sustained_duration_secs)
    }
}

impl MonitoringConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }
}
