//! Generation request value objects.
//!
//! Requests are validated once at submission and never mutated afterwards.
//! Field names follow the public API's camelCase convention.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shaping::{AnimationStyle, MotionLevel, VideoDimensions};

/// Request to generate a narration script.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    #[serde(default)]
    pub prompt: String,
}

impl ScriptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Request to generate a video clip.
///
/// The optional shaping labels are kept verbatim as received; resolution into
/// wire values happens through the lookup accessors below.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoRequest {
    #[serde(default)]
    pub prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_intensity: Option<String>,
}

impl VideoRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            aspect_ratio: None,
            animation_style: None,
            motion_intensity: None,
        }
    }

    /// Resolved output dimensions.
    pub fn dimensions(&self) -> VideoDimensions {
        VideoDimensions::resolve(self.aspect_ratio.as_deref())
    }

    /// Resolved motion level.
    pub fn motion(&self) -> MotionLevel {
        MotionLevel::resolve(self.motion_intensity.as_deref())
    }

    /// Resolved animation style.
    pub fn style(&self) -> AnimationStyle {
        AnimationStyle::resolve(self.animation_style.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_request_deserializes_camel_case() {
        let json = r#"{
            "prompt": "mountain sunrise",
            "aspectRatio": "portrait",
            "animationStyle": "cinematic",
            "motionIntensity": "high"
        }"#;

        let req: VideoRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.prompt, "mountain sunrise");
        assert_eq!(req.dimensions(), VideoDimensions::PORTRAIT);
        assert_eq!(req.style().model_id(), "gen3-cinematic");
        assert_eq!(req.motion().intensity(), 8);
    }

    #[test]
    fn test_bare_prompt_resolves_defaults() {
        let req: VideoRequest = serde_json::from_str(r#"{"prompt":"a city at night"}"#).unwrap();

        assert_eq!(req.dimensions(), VideoDimensions::LANDSCAPE);
        assert_eq!(req.motion().intensity(), 5);
        assert_eq!(req.style().model_id(), "gen3");
    }

    #[test]
    fn test_missing_prompt_deserializes_empty() {
        let req: VideoRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_empty());

        let req: ScriptRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_empty());
    }

    #[test]
    fn test_typo_in_shaping_is_not_rejected() {
        let json = r#"{"prompt":"x","aspectRatio":"portrate","motionIntensity":"hgih"}"#;
        let req: VideoRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.dimensions(), VideoDimensions::LANDSCAPE);
        assert_eq!(req.motion(), MotionLevel::Medium);
    }
}
