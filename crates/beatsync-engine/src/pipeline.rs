//! Fetch-and-transform pipeline.
//!
//! Runs at most once per job, after the poll path has claimed the run in the
//! registry: stream the provider's artifact into a temp file, center-crop it
//! to 9:16, promote the rendition into the processed directory and record the
//! terminal state. Temp files are drop-guarded so every exit path, including
//! a panicking task, leaves the working directory clean.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use beatsync_media::{crop_vertical, fetch_to_file, MediaStore};
use beatsync_models::{Job, JobId};

use crate::config::EngineConfig;
use crate::registry::JobRegistry;

/// Downloads, transcodes and promotes one claimed job at a time, bounded by
/// a fixed-size permit pool across jobs.
#[derive(Clone)]
pub struct TransformPipeline {
    registry: JobRegistry,
    store: MediaStore,
    http: reqwest::Client,
    permits: Arc<Semaphore>,
    transcode_timeout_secs: u64,
}

impl TransformPipeline {
    pub fn new(registry: JobRegistry, store: MediaStore, config: &EngineConfig) -> Self {
        Self {
            registry,
            store,
            http: reqwest::Client::new(),
            permits: Arc::new(Semaphore::new(config.max_concurrent_transcodes.max(1))),
            transcode_timeout_secs: config.transcode_timeout_secs,
        }
    }

    /// Run the pipeline for a claimed job and return its terminal snapshot.
    ///
    /// The body runs in a spawned task: a caller that disconnects mid-poll
    /// cannot cancel a half-finished transcode and leave a claimed job stuck.
    pub async fn run(&self, id: JobId, source_url: String) -> Job {
        let pipeline = self.clone();
        let task_id = id.clone();
        let handle =
            tokio::spawn(async move { pipeline.execute(task_id, source_url).await });

        match handle.await {
            Ok(job) => job,
            Err(e) => {
                error!(job_id = %id, error = %e, "Transform task aborted");
                self.finish_failed(&id, "transform task aborted unexpectedly")
                    .await
            }
        }
    }

    async fn execute(&self, id: JobId, source_url: String) -> Job {
        // Bound simultaneous transcodes; a burst of provider successes queues
        // here instead of spawning unbounded encoder processes.
        let _permit = match self.permits.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                return self.finish_failed(&id, "transform worker pool shut down").await;
            }
        };

        info!(job_id = %id, source_url = %source_url, "Starting fetch-and-transform");

        match self.fetch_and_transform(&source_url).await {
            Ok(artifact) => {
                info!(job_id = %id, artifact = %artifact, "Job succeeded");
                match self.registry.succeed(&id, &artifact).await {
                    Some(job) => job,
                    None => {
                        // The registry entry was evicted mid-run; the artifact
                        // has no owner left, so release it.
                        warn!(job_id = %id, "Job vanished during transform, dropping artifact");
                        let _ = self.store.remove_artifact(&artifact).await;
                        orphan_snapshot(&id, "job evicted during transform")
                    }
                }
            }
            Err(detail) => {
                warn!(job_id = %id, detail = %detail, "Fetch-and-transform failed");
                self.finish_failed(&id, detail).await
            }
        }
    }

    /// Download, crop and promote; returns the promoted artifact file name.
    ///
    /// Both intermediate files are guard-owned: the input temp is always
    /// removed, the rendition temp is removed unless the promote moved it
    /// away first.
    async fn fetch_and_transform(&self, source_url: &str) -> Result<String, String> {
        let input = self.store.temp_file("mp4");
        fetch_to_file(&self.http, source_url, input.path())
            .await
            .map_err(|e| format!("download failed: {e}"))?;

        let rendition = self.store.temp_file("mp4");
        crop_vertical(input.path(), rendition.path(), self.transcode_timeout_secs)
            .await
            .map_err(|e| format!("transcode failed: {e}"))?;

        let artifact = self.store.artifact_name("mp4");
        self.store
            .promote(rendition.path(), &artifact)
            .await
            .map_err(|e| format!("promote failed: {e}"))?;

        Ok(artifact)
    }

    async fn finish_failed(&self, id: &JobId, detail: impl Into<String>) -> Job {
        let detail = detail.into();
        match self.registry.fail(id, &detail).await {
            Some(job) => job,
            None => orphan_snapshot(id, &detail),
        }
    }
}

/// Failed snapshot for a job that disappeared from the registry mid-run.
fn orphan_snapshot(id: &JobId, detail: &str) -> Job {
    let mut job = Job::new(id.clone());
    job.fail(detail);
    job
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatsync_models::JobStatus;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Fixture {
        _dir: TempDir,
        store: MediaStore,
        registry: JobRegistry,
        pipeline: TransformPipeline,
    }

    async fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = MediaStore::new(dir.path().join("work"), dir.path().join("processed"));
        store.init().await.unwrap();

        let registry = JobRegistry::new();
        let config = EngineConfig {
            transcode_timeout_secs: 30,
            ..EngineConfig::default()
        };
        let pipeline = TransformPipeline::new(registry.clone(), store.clone(), &config);

        Fixture {
            _dir: dir,
            store,
            registry,
            pipeline,
        }
    }

    async fn work_dir_entries(store: &MediaStore) -> usize {
        let mut entries = tokio::fs::read_dir(store.work_dir()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        count
    }

    async fn claimed_job(registry: &JobRegistry, id: &str, url: &str) -> JobId {
        let id = JobId::from_string(id);
        registry.create(id.clone()).await;
        registry.claim_transform(&id, url).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_failed_download_fails_job_and_leaves_no_temp_files() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw.mp4"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let f = fixture().await;
        let url = format!("{}/raw.mp4", server.uri());
        let id = claimed_job(&f.registry, "vid-1", &url).await;

        let job = f.pipeline.run(id, url).await;

        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error_detail.unwrap().contains("download failed"));
        assert_eq!(work_dir_entries(&f.store).await, 0);
    }

    #[tokio::test]
    async fn test_unreadable_source_media_fails_transcode_and_cleans_up() {
        let server = MockServer::start().await;
        // Bytes that no decoder will accept.
        Mock::given(method("GET"))
            .and(path("/raw.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 4096]))
            .mount(&server)
            .await;

        let f = fixture().await;
        let url = format!("{}/raw.mp4", server.uri());
        let id = claimed_job(&f.registry, "vid-2", &url).await;

        let job = f.pipeline.run(id, url).await;

        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error_detail.unwrap().contains("transcode failed"));
        assert_eq!(work_dir_entries(&f.store).await, 0);
    }

    #[tokio::test]
    async fn test_failure_is_recorded_once_job_is_terminal() {
        let f = fixture().await;
        let id = claimed_job(&f.registry, "vid-3", "http://127.0.0.1:1/raw.mp4").await;

        let job = f
            .pipeline
            .run(id.clone(), "http://127.0.0.1:1/raw.mp4".to_string())
            .await;
        assert_eq!(job.status, JobStatus::Failed);

        // A stale run finishing later must not flip the terminal state.
        let again = f.registry.succeed(&id, "late.mp4").await.unwrap();
        assert_eq!(again.status, JobStatus::Failed);
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg"]
    async fn test_successful_run_promotes_portrait_artifact() {
        let f = fixture().await;

        // Synthesize a landscape source and serve it over HTTP.
        let src = f.store.work_dir().join("source_fixture.mp4");
        let status = tokio::process::Command::new("ffmpeg")
            .args([
                "-y",
                "-v",
                "error",
                "-f",
                "lavfi",
                "-i",
                "testsrc=duration=1:size=1344x768:rate=24",
                "-pix_fmt",
                "yuv420p",
            ])
            .arg(&src)
            .status()
            .await
            .unwrap();
        assert!(status.success());
        let bytes = tokio::fs::read(&src).await.unwrap();
        tokio::fs::remove_file(&src).await.unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/raw.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/raw.mp4", server.uri());
        let id = claimed_job(&f.registry, "vid-4", &url).await;

        let job = f.pipeline.run(id, url).await;

        assert_eq!(job.status, JobStatus::Succeeded);
        let artifact = job.output_path.unwrap();
        let promoted = f.store.artifact_path(&artifact);
        assert!(promoted.exists());
        assert_eq!(work_dir_entries(&f.store).await, 0);

        let info = beatsync_media::probe_video(&promoted).await.unwrap();
        assert_eq!(info.width, 432); // 768 * 9 / 16
        assert_eq!(info.height, 768);
    }
}
