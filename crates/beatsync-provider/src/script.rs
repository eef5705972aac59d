//! Script-generation provider client (chat-completion via RapidAPI).

use reqwest::Client;
use tracing::debug;

use crate::config::{host_of, ProviderConfig};
use crate::error::{ProviderError, ProviderResult};
use crate::types::{ChatMessage, ChatRequestBody, ChatResponseBody};

/// Chat-completion client used for narration scripts.
pub struct ScriptClient {
    http: Client,
    base_url: String,
    host_header: String,
    api_key: String,
}

impl ScriptClient {
    /// Create a new client.
    pub fn new(config: &ProviderConfig) -> ProviderResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.script_base_url.trim_end_matches('/').to_string(),
            host_header: host_of(&config.script_base_url),
            api_key: config.api_key.clone(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(&ProviderConfig::from_env())
    }

    /// Generate narration text for a prompt.
    ///
    /// Returns the provider's output trimmed of surrounding whitespace;
    /// callers apply their own length policy on top.
    pub async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        if prompt.trim().is_empty() {
            return Err(ProviderError::validation("Prompt is required"));
        }

        let body = ChatRequestBody {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            web_access: false,
        };

        let url = format!("{}/chatgpt", self.base_url);
        debug!(prompt_chars = prompt.len(), "Requesting script generation");

        let response = self
            .http
            .post(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host_header)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let msg = format!("script provider returned {status}: {text}");
            return Err(if status.is_server_error() {
                ProviderError::unavailable(msg)
            } else {
                ProviderError::rejected(msg)
            });
        }

        let parsed: ChatResponseBody = response.json().await?;
        if !parsed.status {
            return Err(ProviderError::rejected(
                "script provider reported a failed generation",
            ));
        }

        let script = parsed.result.trim().to_string();
        if script.is_empty() {
            return Err(ProviderError::rejected("script provider returned no text"));
        }

        Ok(script)
    }
}
