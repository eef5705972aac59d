//! Video-generation provider client (RunwayML text-to-video via RapidAPI).

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use beatsync_models::{JobId, VideoRequest};

use crate::config::{host_of, ProviderConfig};
use crate::error::{ProviderError, ProviderResult};
use crate::types::{GenerateVideoBody, GenerateVideoResponse, ProviderStatus, VideoStatusResponse};

/// Seconds of footage requested per generation.
const CLIP_SECONDS: u32 = 5;

/// Remote video-generation service.
///
/// The orchestration layer is written against this trait so tests can drive
/// it with scripted providers instead of live HTTP.
#[async_trait]
pub trait VideoGeneration: Send + Sync {
    /// Submit a generation request, returning the provider's identifier.
    async fn submit(&self, request: &VideoRequest) -> ProviderResult<JobId>;

    /// Fetch the provider's current view of a job.
    async fn poll_status(&self, id: &JobId) -> ProviderResult<ProviderStatus>;
}

/// RunwayML-compatible text-to-video client.
pub struct RunwayClient {
    http: Client,
    base_url: String,
    host_header: String,
    api_key: String,
}

impl RunwayClient {
    /// Create a new client.
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.video_base_url.trim_end_matches('/').to_string(),
            host_header: host_of(&config.video_base_url),
            api_key: config.api_key.clone(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(&ProviderConfig::from_env())
    }
}

#[async_trait]
impl VideoGeneration for RunwayClient {
    async fn submit(&self, request: &VideoRequest) -> ProviderResult<JobId> {
        if request.prompt.trim().is_empty() {
            return Err(ProviderError::validation("Prompt is required"));
        }

        let dims = request.dimensions();
        let body = GenerateVideoBody {
            text_prompt: &request.prompt,
            model: request.style().model_id(),
            width: dims.width,
            height: dims.height,
            motion: request.motion().intensity(),
            seed: 0,
            callback_url: "",
            time: CLIP_SECONDS,
        };

        let url = format!("{}/generate/text", self.base_url);
        debug!(
            model = body.model,
            width = body.width,
            height = body.height,
            motion = body.motion,
            "Submitting video generation"
        );

        let response = self
            .http
            .post(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host_header)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error("video provider", response).await);
        }

        let parsed: GenerateVideoResponse = response.json().await?;
        match parsed.uuid {
            Some(uuid) if !uuid.is_empty() => Ok(JobId::from_string(uuid)),
            _ => Err(ProviderError::protocol(
                "submit response did not contain a uuid",
            )),
        }
    }

    async fn poll_status(&self, id: &JobId) -> ProviderResult<ProviderStatus> {
        let url = format!("{}/status", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("uuid", id.as_str())])
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host_header)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error("video status endpoint", response).await);
        }

        let parsed: VideoStatusResponse = response.json().await?;
        normalize_status(parsed)
    }
}

/// Map an upstream non-2xx response into the error taxonomy: 5xx means the
/// provider is down, everything else means it refused us.
async fn upstream_error(what: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let msg = format!("{what} returned {status}: {body}");

    if status.is_server_error() {
        ProviderError::unavailable(msg)
    } else {
        ProviderError::rejected(msg)
    }
}

fn normalize_status(raw: VideoStatusResponse) -> ProviderResult<ProviderStatus> {
    let status = raw.status.unwrap_or_default();
    match status.as_str() {
        "success" => match raw.url {
            Some(url) if !url.is_empty() => Ok(ProviderStatus::Succeeded { source_url: url }),
            // A success without an artifact location would poll forever;
            // treat it as a broken payload instead.
            _ => Err(ProviderError::protocol(
                "status reported success without an artifact url",
            )),
        },
        "failed" | "error" => Ok(ProviderStatus::Failed {
            detail: raw
                .error_message
                .unwrap_or_else(|| format!("provider reported status '{status}'")),
        }),
        _ => Ok(ProviderStatus::Pending {
            progress: raw.progress,
        }),
    }
}
