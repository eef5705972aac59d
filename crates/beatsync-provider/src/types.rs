//! Provider status types and wire formats.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider-reported lifecycle state, normalized from the upstream wire
/// format.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderStatus {
    /// Generation still in flight. `progress` is passed through verbatim as
    /// the provider reported it.
    Pending { progress: Option<Value> },
    /// Generation finished; the raw artifact is downloadable at `source_url`.
    Succeeded { source_url: String },
    /// The provider gave up on this request.
    Failed { detail: String },
}

/// Body of the text-to-video submit call.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateVideoBody<'a> {
    pub text_prompt: &'a str,
    pub model: &'a str,
    pub width: u32,
    pub height: u32,
    pub motion: u8,
    pub seed: u32,
    pub callback_url: &'a str,
    pub time: u32,
}

/// Response of the text-to-video submit call.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateVideoResponse {
    pub uuid: Option<String>,
}

/// Response of the video status call.
#[derive(Debug, Deserialize)]
pub(crate) struct VideoStatusResponse {
    pub status: Option<String>,
    pub progress: Option<Value>,
    pub url: Option<String>,
    pub error_message: Option<String>,
}

/// One chat message in the script provider's wire format.
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Body of the script generation call.
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequestBody<'a> {
    pub messages: Vec<ChatMessage<'a>>,
    pub web_access: bool,
}

/// Response of the script generation call.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseBody {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub result: String,
}
