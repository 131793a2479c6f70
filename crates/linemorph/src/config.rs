//! Animation and chart configuration.
//!
//! Both types deserialize from TOML; missing keys fall back to defaults.
//!
//! ```toml
//! shadow_offset = 2.5
//!
//! [animation]
//! animate = true
//! animation_duration_ms = 450
//!
//! [content_inset]
//! top = 10
//! bottom = 10
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AnimationResult;

/// Default animation duration.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Default vertical offset of the shadow line, in data units.
pub const DEFAULT_SHADOW_OFFSET: f32 = 3.0;

/// Whether and how fast path changes animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Animate path changes. When false, new paths are applied immediately.
    pub animate: bool,
    /// How long one transition takes.
    #[serde(rename = "animation_duration_ms", with = "duration_ms")]
    pub duration: Duration,
}

impl AnimationConfig {
    /// Create the default configuration: animated, 300ms.
    pub fn new() -> Self {
        Self {
            animate: true,
            duration: DEFAULT_ANIMATION_DURATION,
        }
    }

    /// A configuration that applies every path immediately.
    pub fn disabled() -> Self {
        Self {
            animate: false,
            ..Self::new()
        }
    }

    /// Set whether to animate using builder pattern.
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Set the duration using builder pattern.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Space kept free around the plotted line, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentInset {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl ContentInset {
    /// The same inset on every side.
    pub fn uniform(inset: f32) -> Self {
        Self {
            top: inset,
            bottom: inset,
            left: inset,
            right: inset,
        }
    }
}

/// Configuration of a [`LineChart`](crate::LineChart).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// How far below the line the shadow is drawn, in data units.
    pub shadow_offset: f32,
    pub animation: AnimationConfig,
    pub content_inset: ContentInset,
}

impl ChartConfig {
    pub fn new() -> Self {
        Self {
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            animation: AnimationConfig::new(),
            content_inset: ContentInset::default(),
        }
    }

    /// Parse a chart configuration from a TOML document.
    pub fn from_toml_str(s: &str) -> AnimationResult<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a `Duration` as whole milliseconds.
mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnimationConfig::default();
        assert!(config.animate);
        assert_eq!(config.duration, Duration::from_millis(300));

        let chart = ChartConfig::default();
        assert_eq!(chart.shadow_offset, 3.0);
        assert_eq!(chart.content_inset, ContentInset::default());
    }

    #[test]
    fn test_builders() {
        let config = AnimationConfig::new()
            .with_animate(false)
            .with_duration(Duration::from_millis(120));
        assert!(!config.animate);
        assert_eq!(config.duration, Duration::from_millis(120));
        assert!(!AnimationConfig::disabled().animate);
    }

    #[test]
    fn test_parse_full_document() {
        let config = ChartConfig::from_toml_str(
            r#"
            shadow_offset = 2.5

            [animation]
            animate = false
            animation_duration_ms = 450

            [content_inset]
            top = 10
            left = 4.5
            "#,
        )
        .unwrap();

        assert_eq!(config.shadow_offset, 2.5);
        assert!(!config.animation.animate);
        assert_eq!(config.animation.duration, Duration::from_millis(450));
        assert_eq!(config.content_inset.top, 10.0);
        assert_eq!(config.content_inset.left, 4.5);
        assert_eq!(config.content_inset.bottom, 0.0);
    }

    #[test]
    fn test_parse_empty_document_uses_defaults() {
        assert_eq!(ChartConfig::from_toml_str("").unwrap(), ChartConfig::default());
    }

    #[test]
    fn test_parse_partial_animation_table() {
        let config = ChartConfig::from_toml_str("[animation]\nanimation_duration_ms = 90\n").unwrap();
        assert!(config.animation.animate);
        assert_eq!(config.animation.duration, Duration::from_millis(90));
    }

    #[test]
    fn test_parse_error() {
        let err = ChartConfig::from_toml_str("shadow_offset = \"high\"").unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = ChartConfig {
            animation: AnimationConfig::new().with_duration(Duration::from_millis(1250)),
            content_inset: ContentInset::uniform(8.0),
            shadow_offset: 1.5,
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("animation_duration_ms = 1250"));
        assert_eq!(ChartConfig::from_toml_str(&text).unwrap(), config);
    }
}
