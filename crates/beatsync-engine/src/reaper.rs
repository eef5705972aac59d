//! Time-based eviction of terminal jobs.
//!
//! Jobs are destroyed only here: a background task removes terminal entries
//! once they outlive the retention window and releases the artifact of an
//! evicted successful job. Non-terminal jobs stay pollable indefinitely.

use std::time::Duration;

use tokio::time::interval;
use tracing::{info, warn};

use beatsync_media::MediaStore;

use crate::config::EngineConfig;
use crate::registry::JobRegistry;

/// Background eviction task.
pub struct JobReaper {
    registry: JobRegistry,
    store: MediaStore,
    retention: Duration,
    reap_interval: Duration,
}

impl JobReaper {
    pub fn new(registry: JobRegistry, store: MediaStore, config: &EngineConfig) -> Self {
        Self {
            registry,
            store,
            retention: config.job_retention,
            reap_interval: config.reap_interval,
        }
    }

    /// Run the eviction loop. Spawn as a background task; it never returns.
    pub async fn run(&self) {
        info!(
            retention_secs = self.retention.as_secs(),
            interval_secs = self.reap_interval.as_secs(),
            "Starting job reaper"
        );

        let mut ticker = interval(self.reap_interval);
        // The first tick completes immediately; skip it so a fresh start
        // does not race jobs created during boot.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = self.run_once().await;
            if evicted > 0 {
                info!(evicted, "Evicted expired jobs");
            }
        }
    }

    /// Run a single eviction cycle, returning how many jobs were removed.
    pub async fn run_once(&self) -> usize {
        let evicted = self.registry.reap_terminal(self.retention).await;

        for job in &evicted {
            // Once the registry entry is gone nothing else references the
            // artifact; removal is best-effort.
            if let Some(artifact) = &job.output_path {
                if let Err(e) = self.store.remove_artifact(artifact).await {
                    warn!(
                        job_id = %job.id,
                        artifact = %artifact,
                        error = %e,
                        "Failed to remove artifact of evicted job"
                    );
                }
            }
        }

        evicted.len()
    }
}
