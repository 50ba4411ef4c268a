//! Session settings
//!
//! Viewport and seed configuration, stored as JSON. Game balance is not
//! configurable here; it lives in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield width in pixels
    pub screen_width: f32,
    /// Playfield height in pixels
    pub screen_height: f32,
    /// Fixed RNG seed; `None` picks one at startup
    pub seed: Option<u64>,
    /// Frames the headless runner simulates before exiting
    pub headless_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            seed: None,
            headless_frames: 3600,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Reject viewports the playfield cannot be laid out in
    pub fn validate(&self) -> Result<(), SettingsError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(self.screen_width) && valid(self.screen_height) {
            Ok(())
        } else {
            Err(SettingsError::InvalidViewport {
                width: self.screen_width,
                height: self.screen_height,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.screen_width, 1280.0);
        assert_eq!(settings.screen_height, 720.0);
        assert!(settings.seed.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "screen_width": 1920 }"#)
            .expect("valid settings");
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.screen_width, 1920.0);
        assert_eq!(settings.screen_height, 720.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(7),
            ..Settings::default()
        };
        let json = settings.to_json().expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), settings);
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let err = Settings::from_json(r#"{ "screen_height": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidViewport { .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = Path::new("/definitely/not/here/sea_defenders.json");
        assert!(matches!(
            Settings::load_from_file(path),
            Err(SettingsError::Io(_))
        ));
        assert_eq!(Settings::load_or_default(path), Settings::default());
    }
}
