// Host resource sampling via sysinfo: 1-minute load average plus resident
// memory of this process, refreshed off the runtime via spawn_blocking.

use crate::models::ResourceSample;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Pid, ProcessesToUpdate, System};

pub struct ResourceMonitor {
    sys: Arc<std::sync::Mutex<System>>,
    pid: Pid,
}

impl ResourceMonitor {
    pub fn new() -> anyhow::Result<Self> {
        let pid = sysinfo::get_current_pid().map_err(|e| anyhow::anyhow!("current pid: {}", e))?;
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        Ok(Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            pid,
        })
    }

    pub async fn sample(&self) -> anyhow::Result<ResourceSample> {
        let sys = self.sys.clone();
        let pid = self.pid;
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

            let cpu_load = System::load_average().one;
            let memory_mb = sys
                .process(pid)
                .map(|p| p.memory() as f64 / (1024.0 * 1024.0))
                .unwrap_or(0.0);

            Ok(ResourceSample { cpu_load, memory_mb })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Samples once per `interval` until `window` has elapsed. The sample
    /// count is fixed up front so a slow refresh never extends the window.
    pub async fn sample_window(
        &self,
        window: Duration,
        interval: Duration,
    ) -> anyhow::Result<Vec<ResourceSample>> {
        let count = (window.as_millis() / interval.as_millis().max(1)).max(1) as usize;
        let mut tick = tokio::time::interval(interval);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            tick.tick().await;
            samples.push(self.sample().await?);
        }
        Ok(samples)
    }
}
