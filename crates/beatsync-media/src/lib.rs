//! Media acquisition and post-processing.
//!
//! This crate provides:
//! - Working/artifact directory management with scoped temp files
//! - Streaming HTTP download of generated media
//! - FFmpeg command building and the 9:16 crop transcode
//! - FFprobe-based video inspection

pub mod command;
pub mod download;
pub mod error;
pub mod probe;
pub mod store;
pub mod transcode;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use download::fetch_to_file;
pub use error::{MediaError, MediaResult};
pub use probe::{probe_video, VideoInfo};
pub use store::{MediaStore, TempFile};
pub use transcode::{crop_vertical, CROP_VERTICAL_FILTER};
