//! Generation job definitions and state machine.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a generation job.
///
/// Equals the external identifier assigned by the video provider, so the
/// value a caller polls with is the same one sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted by the provider, not yet observed running
    #[default]
    Queued,
    /// Provider is generating, or the local transform is in flight
    Running,
    /// Artifact downloaded, transformed, and promoted
    Succeeded,
    /// Provider gave up or the local transform failed
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        }
    }

    /// Terminal states are immutable once reached.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// One tracked generation request, from submission to terminal outcome.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Job ID (the provider's external identifier)
    pub id: JobId,

    /// Current lifecycle state
    #[serde(default)]
    pub status: JobStatus,

    /// Remote location of the raw artifact; set once the provider reports
    /// success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Servable path of the finished artifact, relative to the
    /// processed-media root; set if and only if the job succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,

    /// Failure detail; set if and only if the job failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// When the job reached a terminal state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal_at: Option<DateTime<Utc>>,

    /// Held while a transform run owns this job; at most one run ever
    /// observes the claim as its own
    #[serde(skip)]
    pub transform_claimed: bool,
}

impl Job {
    /// Create a new job in `Queued` state.
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            source_url: None,
            output_path: None,
            error_detail: None,
            created_at: Utc::now(),
            terminal_at: None,
            transform_claimed: false,
        }
    }

    /// Record that the provider is working on the job. Only promotes
    /// `Queued`; running and terminal states are left untouched.
    pub fn mark_running(&mut self) {
        if self.status == JobStatus::Queued {
            self.status = JobStatus::Running;
        }
    }

    /// Transition to `Succeeded` with the promoted artifact path.
    /// No-op if the job is already terminal.
    pub fn succeed(&mut self, output_path: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Succeeded;
        self.output_path = Some(output_path.into());
        self.error_detail = None;
        self.terminal_at = Some(Utc::now());
        self.transform_claimed = false;
    }

    /// Transition to `Failed` with a failure detail.
    /// No-op if the job is already terminal.
    pub fn fail(&mut self, detail: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = JobStatus::Failed;
        self.error_detail = Some(detail.into());
        self.terminal_at = Some(Utc::now());
        self.transform_claimed = false;
    }
}
