//! Provider error taxonomy.

use thiserror::Error;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors surfaced by provider clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Caller fault: required input missing or empty. No network call was
    /// issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network-level failure or provider outage.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered, but not in the shape we understand.
    #[error("Unexpected provider response: {0}")]
    Protocol(String),

    /// The provider understood the request and refused it.
    #[error("Provider rejected request: {0}")]
    Rejected(String),
}

impl ProviderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Whether a later attempt at the caller's own cadence could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Unavailable(_))
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Protocol(e.to_string())
        } else {
            // connect errors, timeouts, TLS failures and anything else on the
            // transport path
            Self::Unavailable(e.to_string())
        }
    }
}
