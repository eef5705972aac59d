//! Request handlers.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use beatsync_engine::PollOutcome;
use beatsync_media::check_ffmpeg;
use beatsync_models::{truncate_script, JobId, JobStatus, ScriptRequest, VideoRequest};

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::state::AppState;

/// Generated script response.
#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub script: String,
}

/// Accepted video job response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub job_id: JobId,
}

/// Query parameters of the status endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    #[serde(rename = "jobId")]
    pub job_id: Option<String>,
}

/// Poll response for one job.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    fn from_outcome(outcome: PollOutcome, config: &ApiConfig) -> Self {
        let job = outcome.job;
        Self {
            status: job.status,
            progress: outcome.progress,
            output_url: job.output_path.as_deref().map(|p| config.output_url(p)),
            error: job.error_detail,
        }
    }
}

/// `POST /api/video/generate-script` — synchronous script generation.
pub async fn generate_script(
    State(state): State<AppState>,
    Json(request): Json<ScriptRequest>,
) -> ApiResult<Json<ScriptResponse>> {
    let raw = state.script.generate(&request.prompt).await?;
    Ok(Json(ScriptResponse {
        script: truncate_script(&raw),
    }))
}

/// `POST /api/video/generate-video` — submit a video generation job.
pub async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<VideoRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    let id = state.provider.submit(&request).await?;
    let job = state.registry.create(id).await;
    Ok(Json(SubmitResponse { job_id: job.id }))
}

/// `GET /api/video/status?jobId=...` — poll a job.
pub async fn video_status(
    State(state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> ApiResult<Json<StatusResponse>> {
    let job_id = params.job_id.unwrap_or_default();
    let outcome = state.poller.poll(&job_id).await?;
    Ok(Json(StatusResponse::from_outcome(outcome, &state.config)))
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub ffmpeg: bool,
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        ffmpeg: check_ffmpeg().is_ok(),
    })
}
