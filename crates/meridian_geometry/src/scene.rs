//! # Scene Context
//!
//! Rendering capabilities and defaults the updaters need from the scene.
//!
//! ## Config file
//!
//! ```toml
//! ground_primitives_supported = true
//! maximum_aliased_line_width = 10.0
//! default_granularity = 0.017453292519943295
//! default_slices = 128
//! default_vertical_lines = 16
//! ```
//!
//! Every key is optional.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Scene capabilities and geometry defaults, loaded once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Whether terrain-clamped ground primitives can be drawn.
    pub ground_primitives_supported: bool,
    /// Widest line the renderer can rasterize.
    pub maximum_aliased_line_width: f32,
    /// Default angular distance between generated points, in radians.
    pub default_granularity: f64,
    /// Default number of cylinder edges.
    pub default_slices: u32,
    /// Default number of cylinder outline verticals.
    pub default_vertical_lines: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground_primitives_supported: true,
            maximum_aliased_line_width: 1.0,
            default_granularity: std::f64::consts::PI / 180.0,
            default_slices: 128,
            default_vertical_lines: 16,
        }
    }
}

impl SceneConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.maximum_aliased_line_width >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "maximum_aliased_line_width must be at least 1, got {}",
                self.maximum_aliased_line_width
            )));
        }
        if !(self.default_granularity > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "default_granularity must be positive, got {}",
                self.default_granularity
            )));
        }
        if self.default_slices < 3 {
            return Err(ConfigError::Invalid(format!(
                "default_slices must be at least 3, got {}",
                self.default_slices
            )));
        }
        if self.default_vertical_lines == 0 {
            return Err(ConfigError::Invalid(
                "default_vertical_lines must be at least 1, got 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Shared, read-only view of the scene handed to every updater.
#[derive(Clone, Debug, Default)]
pub struct SceneContext {
    config: Arc<SceneConfig>,
}

impl SceneContext {
    /// Wraps a config.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Scene without ground primitive support.
    #[must_use]
    pub fn without_ground_primitives() -> Self {
        Self::new(SceneConfig {
            ground_primitives_supported: false,
            ..SceneConfig::default()
        })
    }

    /// The underlying config.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Capability query gating the on-terrain path.
    #[inline]
    #[must_use]
    pub fn ground_primitives_supported(&self) -> bool {
        self.config.ground_primitives_supported
    }

    /// Clamps an outline width to what the renderer can draw.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn clamp_line_width(&self, width: f64) -> f32 {
        let maximum = self.config.maximum_aliased_line_width.max(1.0);
        (width as f32).clamp(1.0, maximum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SceneConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = SceneConfig::from_toml_str(
            "ground_primitives_supported = false\nmaximum_aliased_line_width = 4.0\n",
        )
        .expect("config parses");
        assert!(!config.ground_primitives_supported);
        assert!((config.maximum_aliased_line_width - 4.0).abs() < f32::EPSILON);
        assert_eq!(config.default_slices, 128);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = SceneConfig::from_toml_str("default_granularity = -1.0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = SceneConfig::from_toml_str("default_slices = \"many\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_vertical_lines_rejected() {
        let result = SceneConfig::from_toml_str("default_vertical_lines = 0");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config = SceneConfig::from_toml_str("default_vertical_lines = 1")
            .expect("one line is valid");
        assert_eq!(config.default_vertical_lines, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SceneConfig::load("/nonexistent/meridian/scene.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_line_width_clamped() {
        let scene = SceneContext::new(SceneConfig {
            maximum_aliased_line_width: 4.0,
            ..SceneConfig::default()
        });
        assert!((scene.clamp_line_width(8.0) - 4.0).abs() < f32::EPSILON);
        assert!((scene.clamp_line_width(0.5) - 1.0).abs() < f32::EPSILON);
        assert!(scene.ground_primitives_supported());
        assert!(!SceneContext::without_ground_primitives().ground_primitives_supported());
    }
}
