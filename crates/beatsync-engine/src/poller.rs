//! Client-facing status polling.
//!
//! Maps a job's current state to a response, re-querying the provider for
//! live jobs and triggering the transform pipeline on the first observed
//! provider success. Terminal jobs are answered from the registry without
//! touching the provider.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use beatsync_models::{Job, JobId};
use beatsync_provider::{ProviderStatus, VideoGeneration};

use crate::error::{EngineError, EngineResult};
use crate::pipeline::TransformPipeline;
use crate::registry::{JobRegistry, TransformClaim};

/// Result of one poll: the job snapshot plus the provider's pass-through
/// progress value when the job is still in flight.
#[derive(Debug, Clone)]
pub struct PollOutcome {
    pub job: Job,
    pub progress: Option<Value>,
}

impl PollOutcome {
    fn settled(job: Job) -> Self {
        Self {
            job,
            progress: None,
        }
    }
}

/// The poll state machine over registry, provider and pipeline.
pub struct StatusPoller {
    provider: Arc<dyn VideoGeneration>,
    registry: JobRegistry,
    pipeline: TransformPipeline,
}

impl StatusPoller {
    pub fn new(
        provider: Arc<dyn VideoGeneration>,
        registry: JobRegistry,
        pipeline: TransformPipeline,
    ) -> Self {
        Self {
            provider,
            registry,
            pipeline,
        }
    }

    /// Poll one job by its caller-visible identifier.
    pub async fn poll(&self, raw_id: &str) -> EngineResult<PollOutcome> {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            return Err(EngineError::validation("jobId is required"));
        }

        let id = JobId::from_string(raw_id);
        let job = self
            .registry
            .get(&id)
            .await
            .ok_or_else(|| EngineError::not_found(raw_id))?;

        // Terminal results are cached; the provider is never re-queried.
        if job.status.is_terminal() {
            return Ok(PollOutcome::settled(job));
        }

        match self.provider.poll_status(&id).await? {
            ProviderStatus::Pending { progress } => {
                let job = self
                    .registry
                    .mark_running(&id)
                    .await
                    .ok_or_else(|| EngineError::not_found(raw_id))?;
                Ok(PollOutcome { job, progress })
            }
            ProviderStatus::Failed { detail } => {
                warn!(job_id = %id, detail = %detail, "Provider reported failure");
                let job = self
                    .registry
                    .fail(&id, detail)
                    .await
                    .ok_or_else(|| EngineError::not_found(raw_id))?;
                Ok(PollOutcome::settled(job))
            }
            ProviderStatus::Succeeded { source_url } => {
                match self
                    .registry
                    .claim_transform(&id, &source_url)
                    .await
                    .ok_or_else(|| EngineError::not_found(raw_id))?
                {
                    TransformClaim::Claimed => {
                        info!(job_id = %id, "Provider success observed, running transform");
                        let job = self.pipeline.run(id, source_url).await;
                        Ok(PollOutcome::settled(job))
                    }
                    // A concurrent poll owns the run; report the in-flight
                    // (or by now terminal) snapshot instead of re-downloading.
                    TransformClaim::InFlight(job) | TransformClaim::Terminal(job) => {
                        Ok(PollOutcome::settled(job))
                    }
                }
            }
        }
    }
}
