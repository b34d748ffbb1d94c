// SPDX-License-Identifier: GPL-3.0-only

//! User configuration, persisted as JSON under the config directory

use crate::backends::camera::FlashMode;
use crate::pipelines::watermark::WatermarkStyle;
use crate::storage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where tagged photos are written; None means ~/Pictures/geocam
    pub output_dir: Option<PathBuf>,
    /// Where confirmed photos are persisted; None means the default
    /// gallery directory
    pub gallery_dir: Option<PathBuf>,
    /// Flash mode applied when a camera session opens
    pub flash_mode: FlashMode,
    /// Watermark rendering style
    pub watermark: WatermarkStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            gallery_dir: None,
            flash_mode: FlashMode::default(),
            watermark: WatermarkStyle::default(),
        }
    }
}

impl Config {
    /// Path of the persisted config file
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("geocam")
            .join("config.json")
    }

    /// Load the config, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Malformed config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the config
    pub fn save(&self) -> Result<(), std::io::Error> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Effective tagged-photo directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(storage::get_photo_directory)
    }

    /// Effective gallery directory
    pub fn gallery_dir(&self) -> PathBuf {
        self.gallery_dir
            .clone()
            .unwrap_or_else(storage::get_gallery_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GlyphScale;

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = Config::default();
        config.output_dir = Some(PathBuf::from("/tmp/photos"));
        config.flash_mode = FlashMode::Off;
        config.watermark.scale = GlyphScale::Large;

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = serde_json::from_str(r#"{"flash_mode":"On"}"#).unwrap();
        assert_eq!(parsed.flash_mode, FlashMode::On);
        assert_eq!(parsed.watermark, WatermarkStyle::default());
        assert!(parsed.output_dir.is_none());
    }
}
