//! Video shaping parameters.
//!
//! Caller-facing labels are resolved into provider wire values through fixed
//! lookup tables. Absent or unrecognized labels silently fall back to the
//! defaults; callers are not rejected for parameter typos. Matching is
//! case-insensitive.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output frame dimensions sent to the video provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

impl VideoDimensions {
    /// 16:9-ish landscape frame, the provider default.
    pub const LANDSCAPE: Self = Self {
        width: 1344,
        height: 768,
    };

    /// Portrait frame.
    pub const PORTRAIT: Self = Self {
        width: 768,
        height: 1344,
    };

    /// Resolve an aspect-ratio label. Anything other than `portrait`
    /// resolves to landscape.
    pub fn resolve(label: Option<&str>) -> Self {
        match normalize(label).as_deref() {
            Some("portrait") => Self::PORTRAIT,
            _ => Self::LANDSCAPE,
        }
    }
}

impl Default for VideoDimensions {
    fn default() -> Self {
        Self::LANDSCAPE
    }
}

/// How much camera/subject motion to request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum MotionLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl MotionLevel {
    /// Resolve a motion-intensity label; unrecognized values mean medium.
    pub fn resolve(label: Option<&str>) -> Self {
        match normalize(label).as_deref() {
            Some("low") => MotionLevel::Low,
            Some("high") => MotionLevel::High,
            _ => MotionLevel::Medium,
        }
    }

    /// Numeric motion value on the provider's 1-10 scale.
    pub fn intensity(&self) -> u8 {
        match self {
            MotionLevel::Low => 2,
            MotionLevel::Medium => 5,
            MotionLevel::High => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MotionLevel::Low => "low",
            MotionLevel::Medium => "medium",
            MotionLevel::High => "high",
        }
    }
}

/// Rendering style, mapped to a provider model identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    Cinematic,
    Smooth,
    Dynamic,
    SlowMotion,
    /// Generic base model, used when no style (or an unknown one) is given
    #[default]
    Base,
}

impl AnimationStyle {
    /// Resolve a style label; unrecognized values mean the base model.
    pub fn resolve(label: Option<&str>) -> Self {
        match normalize(label).as_deref() {
            Some("cinematic") => AnimationStyle::Cinematic,
            Some("smooth") => AnimationStyle::Smooth,
            Some("dynamic") => AnimationStyle::Dynamic,
            Some("slow_motion") => AnimationStyle::SlowMotion,
            _ => AnimationStyle::Base,
        }
    }

    /// Provider model identifier for this style.
    pub fn model_id(&self) -> &'static str {
        match self {
            AnimationStyle::Cinematic => "gen3-cinematic",
            AnimationStyle::Smooth => "gen3-smooth",
            AnimationStyle::Dynamic => "gen3-dynamic",
            AnimationStyle::SlowMotion => "gen3-slowmotion",
            AnimationStyle::Base => "gen3",
        }
    }
}

fn normalize(label: Option<&str>) -> Option<String> {
    label
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_lookup() {
        assert_eq!(
            VideoDimensions::resolve(Some("landscape")),
            VideoDimensions::LANDSCAPE
        );
        assert_eq!(
            VideoDimensions::resolve(Some("portrait")),
            VideoDimensions::PORTRAIT
        );
        assert_eq!(VideoDimensions::PORTRAIT.width, 768);
        assert_eq!(VideoDimensions::PORTRAIT.height, 1344);
    }

    #[test]
    fn test_unrecognized_aspect_falls_back_to_landscape() {
        let default = VideoDimensions {
            width: 1344,
            height: 768,
        };
        assert_eq!(VideoDimensions::resolve(None), default);
        assert_eq!(VideoDimensions::resolve(Some("ultrawide")), default);
        assert_eq!(VideoDimensions::resolve(Some("")), default);
    }

    #[test]
    fn test_motion_lookup() {
        assert_eq!(MotionLevel::resolve(Some("low")).intensity(), 2);
        assert_eq!(MotionLevel::resolve(Some("medium")).intensity(), 5);
        assert_eq!(MotionLevel::resolve(Some("high")).intensity(), 8);
    }

    #[test]
    fn test_unrecognized_motion_falls_back_to_medium() {
        assert_eq!(MotionLevel::resolve(None), MotionLevel::Medium);
        assert_eq!(MotionLevel::resolve(Some("extreme")), MotionLevel::Medium);
        assert_eq!(MotionLevel::resolve(Some("extreme")).intensity(), 5);
    }

    #[test]
    fn test_style_lookup() {
        assert_eq!(
            AnimationStyle::resolve(Some("cinematic")).model_id(),
            "gen3-cinematic"
        );
        assert_eq!(
            AnimationStyle::resolve(Some("smooth")).model_id(),
            "gen3-smooth"
        );
        assert_eq!(
            AnimationStyle::resolve(Some("dynamic")).model_id(),
            "gen3-dynamic"
        );
        assert_eq!(
            AnimationStyle::resolve(Some("slow_motion")).model_id(),
            "gen3-slowmotion"
        );
    }

    #[test]
    fn test_unrecognized_style_falls_back_to_base_model() {
        assert_eq!(AnimationStyle::resolve(None).model_id(), "gen3");
        assert_eq!(AnimationStyle::resolve(Some("vhs")).model_id(), "gen3");
    }

    #[test]
    fn test_resolution_is_case_insensitive() {
        assert_eq!(
            VideoDimensions::resolve(Some("  Portrait ")),
            VideoDimensions::PORTRAIT
        );
        assert_eq!(MotionLevel::resolve(Some("HIGH")), MotionLevel::High);
        assert_eq!(
            AnimationStyle::resolve(Some("Cinematic")),
            AnimationStyle::Cinematic
        );
    }
}
