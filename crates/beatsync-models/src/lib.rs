//! Shared data models for the BeatSync backend.
//!
//! This crate provides Serde-serializable types for:
//! - Generation jobs and their state machine
//! - Script and video generation requests
//! - Video shaping parameters (dimensions, motion, style)
//! - Script length policy

pub mod job;
pub mod request;
pub mod script;
pub mod shaping;

// Re-export common types
pub use job::{Job, JobId, JobStatus};
pub use request::{ScriptRequest, VideoRequest};
pub use script::{truncate_script, MAX_SCRIPT_WORDS};
pub use shaping::{AnimationStyle, MotionLevel, VideoDimensions};
