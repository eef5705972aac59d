//! API configuration.

use tracing::warn;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Public base URL joined onto artifact paths in poll responses
    pub public_base_url: String,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second
    pub rate_limit_rps: u32,
    /// Rate limit burst
    pub rate_limit_burst: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            public_base_url: "http://localhost:8000".to_string(),
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 5,
            rate_limit_burst: 10,
            max_body_size: 1024 * 1024, // 1MB, requests are small JSON bodies
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_parse("PORT", defaults.port),
            public_base_url: public_base_url_from_env(defaults.public_base_url),
            cors_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            rate_limit_rps: env_parse("RATE_LIMIT_RPS", defaults.rate_limit_rps),
            rate_limit_burst: env_parse("RATE_LIMIT_BURST", defaults.rate_limit_burst),
            max_body_size: env_parse("MAX_BODY_SIZE", defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }

    /// Absolute URL for an artifact path under the processed-media root.
    pub fn output_url(&self, artifact: &str) -> String {
        format!(
            "{}/processed_videos/{}",
            self.public_base_url.trim_end_matches('/'),
            artifact
        )
    }
}

fn public_base_url_from_env(default: String) -> String {
    match std::env::var("PUBLIC_BASE_URL") {
        Ok(raw) => match url::Url::parse(&raw) {
            Ok(_) => raw.trim_end_matches('/').to_string(),
            Err(e) => {
                warn!(url = %raw, error = %e, "Invalid PUBLIC_BASE_URL, using default");
                default
            }
        },
        Err(_) => default,
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
