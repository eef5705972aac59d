//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use beatsync_engine::EngineError;
use beatsync_provider::ProviderError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Caller-visible errors at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider-side fault (unavailable, protocol, rejected).
    #[error(transparent)]
    Upstream(ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Validation(msg) => Self::Validation(msg),
            other => Self::Upstream(other),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Validation(msg) => Self::Validation(msg),
            EngineError::NotFound(id) => Self::NotFound(format!("No job with id '{id}'")),
            EngineError::Provider(inner) => Self::from(inner),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full detail is logged server-side; upstream/internal messages can
        // carry provider response bodies and are sanitized for callers in
        // production.
        let error = match &self {
            ApiError::Upstream(inner) => {
                error!(status = %status, detail = %inner, "Upstream provider error");
                if is_production() {
                    "Upstream provider error".to_string()
                } else {
                    self.to_string()
                }
            }
            ApiError::Internal(detail) => {
                error!(status = %status, detail = %detail, "Internal error");
                if is_production() {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

fn is_production() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|v| v.to_lowercase() == "production")
        .unwrap_or(false)
}
