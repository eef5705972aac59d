//! Provider configuration.

use std::time::Duration;

/// Configuration shared by both provider clients.
///
/// The base URLs default to the production RapidAPI hosts and are
/// overridable so tests can target a local mock server.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Subscription key sent as `x-rapidapi-key`
    pub api_key: String,
    /// Base URL of the script-generation provider
    pub script_base_url: String,
    /// Base URL of the video-generation provider
    pub video_base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            script_base_url: "https://open-ai21.p.rapidapi.com".to_string(),
            video_base_url: "https://runwayml.p.rapidapi.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl ProviderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("RAPIDAPI_KEY").unwrap_or_default(),
            script_base_url: std::env::var("SCRIPT_API_BASE_URL")
                .unwrap_or_else(|_| "https://open-ai21.p.rapidapi.com".to_string()),
            video_base_url: std::env::var("VIDEO_API_BASE_URL")
                .unwrap_or_else(|_| "https://runwayml.p.rapidapi.com".to_string()),
            timeout: Duration::from_secs(
                std::env::var("PROVIDER_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        }
    }

    /// Base URL with a mock server address, for tests.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            api_key: "test-key".to_string(),
            script_base_url: base_url.clone(),
            video_base_url: base_url,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Host portion of a base URL, sent as the `x-rapidapi-host` header.
pub(crate) fn host_of(base_url: &str) -> String {
    url::Url::parse(base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.script_base_url, "https://open-ai21.p.rapidapi.com");
        assert_eq!(config.video_base_url, "https://runwayml.p.rapidapi.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://runwayml.p.rapidapi.com"),
            "runwayml.p.rapidapi.com"
        );
        assert_eq!(host_of("http://127.0.0.1:4545"), "127.0.0.1");
        assert_eq!(host_of("not a url"), "");
    }
}
