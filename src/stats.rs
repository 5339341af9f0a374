// Latency aggregation: plain arithmetic mean over wall-clock samples.

use crate::models::LatencySummary;
use std::time::Duration;

pub fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// None on an empty slice; the mean of zero samples is undefined.
pub fn summarize(samples: &[Duration]) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }
    let ms: Vec<f64> = samples.iter().copied().map(duration_ms).collect();
    let mean_ms = ms.iter().sum::<f64>() / ms.len() as f64;
    let min_ms = ms.iter().copied().fold(f64::INFINITY, f64::min);
    let max_ms = ms.iter().copied().fold(0.0, f64::max);
    Some(LatencySummary {
        count: samples.len(),
        mean_ms,
        min_ms,
        max_ms,
    })
}
