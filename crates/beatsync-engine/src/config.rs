//! Engine configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the job engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Working directory for in-flight downloads
    pub work_dir: PathBuf,
    /// Directory finished artifacts are promoted into
    pub processed_dir: PathBuf,
    /// Cap on simultaneous transcode runs
    pub max_concurrent_transcodes: usize,
    /// Per-run transcode timeout in seconds
    pub transcode_timeout_secs: u64,
    /// How long terminal jobs are kept before eviction
    pub job_retention: Duration,
    /// Interval between reaper cycles
    pub reap_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("temp_videos"),
            processed_dir: PathBuf::from("processed_videos"),
            max_concurrent_transcodes: 2,
            transcode_timeout_secs: 300,
            job_retention: Duration::from_secs(3600),
            reap_interval: Duration::from_secs(300),
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            processed_dir: std::env::var("PROCESSED_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.processed_dir),
            max_concurrent_transcodes: env_parse(
                "MAX_CONCURRENT_TRANSCODES",
                defaults.max_concurrent_transcodes,
            ),
            transcode_timeout_secs: env_parse(
                "TRANSCODE_TIMEOUT_SECS",
                defaults.transcode_timeout_secs,
            ),
            job_retention: Duration::from_secs(env_parse("JOB_RETENTION_SECS", 3600)),
            reap_interval: Duration::from_secs(env_parse("JOB_REAP_INTERVAL_SECS", 300)),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
