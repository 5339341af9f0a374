// Report models for one harness run

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatencySummary {
    pub count: usize,
    pub mean_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    pub name: String,
    pub passed: bool,
    /// Mean-latency ceiling the scenario was judged against.
    pub threshold_ms: u64,
    /// Requests the scenario intended to send.
    pub requested: usize,
    /// None when the scenario failed before any sample was recorded.
    pub latency: Option<LatencySummary>,
    /// Failure description (unexpected status, transport error, ...).
    pub detail: Option<String>,
}

/// One (CPU load average, process resident memory) pair from the
/// monitoring window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSample {
    pub cpu_load: f64,
    pub memory_mb: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReport {
    pub passed: bool,
    pub samples: usize,
    pub mean_cpu_load: f64,
    pub peak_memory_mb: f64,
    pub cpu_load_ceiling: f64,
    pub memory_ceiling_mb: f64,
    pub detail: Option<String>,
}

impl ResourceReport {
    pub fn from_samples(samples: &[ResourceSample], cpu_ceiling: f64, memory_ceiling_mb: f64) -> Self {
        if samples.is_empty() {
            return Self {
                passed: false,
                samples: 0,
                mean_cpu_load: 0.0,
                peak_memory_mb: 0.0,
                cpu_load_ceiling: cpu_ceiling,
                memory_ceiling_mb,
                detail: Some("no resource samples recorded".into()),
            };
        }
        let mean_cpu_load =
            samples.iter().map(|s| s.cpu_load).sum::<f64>() / samples.len() as f64;
        let peak_memory_mb = samples.iter().map(|s| s.memory_mb).fold(0.0, f64::max);
        Self {
            passed: mean_cpu_load < cpu_ceiling && peak_memory_mb < memory_ceiling_mb,
            samples: samples.len(),
            mean_cpu_load,
            peak_memory_mb,
            cpu_load_ceiling: cpu_ceiling,
            memory_ceiling_mb,
            detail: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub scenarios: Vec<ScenarioReport>,
    pub resources: ResourceReport,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.scenarios.iter().all(|s| s.passed) && self.resources.passed
    }

    pub fn failed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| !s.passed).count()
            + usize::from(!self.resources.passed)
    }
}
