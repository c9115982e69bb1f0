//! Viewer configuration, loaded from an optional JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::controls::DEFAULT_SPEED;
use crate::scene::ProjectionConfig;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub projection: ProjectionConfig,
    /// World units per full analog push.
    pub navigation_speed: f32,
    /// Delay between snapshot re-reads in the feed thread.
    pub feed_interval_ms: u64,
    pub camera_start: [f32; 3],
    pub horizontal_fov_degrees: f32,
    /// Yaw/pitch speed for the keyboard head stand-in, in degrees per second.
    pub look_speed_degrees: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            navigation_speed: DEFAULT_SPEED,
            feed_interval_ms: 22,
            camera_start: [0.0, 0.0, 120.0],
            horizontal_fov_degrees: 90.0,
            look_speed_degrees: 60.0,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid viewer config {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ViewerConfig = serde_json::from_str(
            r#"{"navigation_speed": 20.0, "projection": {"darken_factor": 0.5}}"#,
        )
        .expect("config parses");

        assert_eq!(config.navigation_speed, 20.0);
        assert_eq!(config.projection.darken_factor, 0.5);
        assert_eq!(config.projection.link_radius_divisor, 5.0);
        assert_eq!(config.feed_interval_ms, 22);
    }

    #[test]
    fn missing_path_uses_defaults() {
        let config = ViewerConfig::load_or_default(None).expect("defaults");
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.navigation_speed, 50.0);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(ViewerConfig::load(Path::new("/nonexistent/graph-walk.json")).is_err());
    }
}
