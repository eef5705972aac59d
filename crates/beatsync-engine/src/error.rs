//! Engine error taxonomy.

use thiserror::Error;

use beatsync_provider::ProviderError;

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by the orchestration layer.
///
/// Pipeline faults (download, transcode) do not appear here: they terminate
/// the job as `Failed` and are surfaced through `Job.error_detail` instead of
/// failing the poll call itself.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller fault: required input missing or empty.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No job known under the given identifier.
    #[error("Job not found: {0}")]
    NotFound(String),

    /// The provider call behind this poll failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl EngineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}
