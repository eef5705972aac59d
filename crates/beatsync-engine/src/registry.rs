//! In-memory job registry.
//!
//! The registry is the single source of truth for job state and the
//! serialization point for everything that mutates it. All writes happen
//! under one lock acquisition; in particular the transform claim is a
//! compare-and-transition, never a read-then-write across lock releases.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use beatsync_models::{Job, JobId};

/// Outcome of attempting to claim the transform run for a job.
#[derive(Debug, Clone)]
pub enum TransformClaim {
    /// The caller owns the transform run; nobody else will start one.
    Claimed,
    /// Another poll claimed the run first; snapshot of the in-flight job.
    InFlight(Job),
    /// The job already reached a terminal state.
    Terminal(Job),
}

/// Shared map from job identifier to job state.
#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new job in `Queued` state under the provider's identifier.
    pub async fn create(&self, id: JobId) -> Job {
        let job = Job::new(id.clone());
        self.jobs.write().await.insert(id, job.clone());
        debug!(job_id = %job.id, "Registered job");
        job
    }

    /// Snapshot of a job, if known.
    pub async fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Number of tracked jobs.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }

    /// Promote a `Queued` job to `Running`. Terminal jobs are untouched.
    pub async fn mark_running(&self, id: &JobId) -> Option<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id)?;
        job.mark_running();
        Some(job.clone())
    }

    /// Transition a job to `Succeeded` with its promoted artifact path.
    /// Idempotent once the job is terminal.
    pub async fn succeed(&self, id: &JobId, output_path: impl Into<String>) -> Option<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id)?;
        job.succeed(output_path);
        Some(job.clone())
    }

    /// Transition a job to `Failed` with a failure detail.
    /// Idempotent once the job is terminal.
    pub async fn fail(&self, id: &JobId, detail: impl Into<String>) -> Option<Job> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id)?;
        job.fail(detail);
        Some(job.clone())
    }

    /// Atomically claim the transform run for a job that the provider
    /// reported finished.
    ///
    /// Exactly one caller per job ever observes [`TransformClaim::Claimed`];
    /// concurrent polls get a snapshot to report instead. Claiming records
    /// the source URL and marks the job `Running`. Returns `None` for an
    /// unknown job.
    pub async fn claim_transform(&self, id: &JobId, source_url: &str) -> Option<TransformClaim> {
        let mut jobs = self.jobs.write().await;
        let job = jobs.get_mut(id)?;

        if job.status.is_terminal() {
            return Some(TransformClaim::Terminal(job.clone()));
        }
        if job.transform_claimed {
            return Some(TransformClaim::InFlight(job.clone()));
        }

        job.transform_claimed = true;
        job.source_url = Some(source_url.to_string());
        job.mark_running();
        debug!(job_id = %id, "Claimed transform run");
        Some(TransformClaim::Claimed)
    }

    /// Remove terminal jobs older than the retention window, returning the
    /// evicted records so the caller can release their artifacts.
    /// Non-terminal jobs are never evicted.
    pub async fn reap_terminal(&self, retention: Duration) -> Vec<Job> {
        let retention =
            chrono::Duration::from_std(retention).unwrap_or_else(|_| chrono::Duration::zero());
        let cutoff = Utc::now() - retention;

        let mut jobs = self.jobs.write().await;
        let expired: Vec<JobId> = jobs
            .values()
            .filter(|job| matches!(job.terminal_at, Some(at) if at < cutoff))
            .map(|job| job.id.clone())
            .collect();

        expired.iter().filter_map(|id| jobs.remove(id)).collect()
    }
}
