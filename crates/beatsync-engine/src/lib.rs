//! Generation job orchestration.
//!
//! This crate ties the provider clients and the media layer together:
//! - [`JobRegistry`]: in-memory source of truth for job state
//! - [`TransformPipeline`]: download, crop transcode and promote
//! - [`StatusPoller`]: the client-facing poll state machine
//! - [`JobReaper`]: time-based eviction of terminal jobs

pub mod config;
pub mod error;
pub mod pipeline;
pub mod poller;
pub mod reaper;
pub mod registry;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use pipeline::TransformPipeline;
pub use poller::{PollOutcome, StatusPoller};
pub use reaper::JobReaper;
pub use registry::{JobRegistry, TransformClaim};
