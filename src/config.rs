// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON in `<config_dir>/snapcam/config.json`. The directory can be
//! overridden with `SNAPCAM_CONFIG_DIR` for tests and portable setups.

use crate::constants::{QualityPreset, paths};
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Container format for captured photos
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PhotoOutputFormat {
    /// Lossy JPEG (default)
    #[default]
    Jpeg,
    /// Lossless PNG
    Png,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Photo directory override, `None` uses `~/Pictures/snapcam`
    pub photo_dir: Option<PathBuf>,
    /// Last used camera device path
    pub last_camera_path: Option<String>,
    /// Output format for captured photos
    pub output_format: PhotoOutputFormat,
    /// JPEG quality preset
    pub quality: QualityPreset,
    /// Mirror the preview of front-facing cameras horizontally (selfie mode)
    pub mirror_preview: bool,
    /// Still images exposed as additional virtual cameras
    pub virtual_sources: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photo_dir: None,
            last_camera_path: None,
            output_format: PhotoOutputFormat::default(),
            quality: QualityPreset::default(),
            mirror_preview: true,
            virtual_sources: Vec::new(),
        }
    }
}

impl Config {
    /// Load the user config, falling back to defaults
    ///
    /// A missing file is normal on first start. A file that fails to parse
    /// is logged and ignored so a bad edit never prevents startup.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            warn!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from_path(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> AppResult<()> {
        let path = config_path().ok_or("No config directory available")?;
        self.save_to_path(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        debug!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Directory captured photos are written to
    pub fn photo_directory(&self) -> PathBuf {
        self.photo_dir
            .clone()
            .unwrap_or_else(crate::storage::default_photo_directory)
    }
}

/// Location of the config file
pub fn config_path() -> Option<PathBuf> {
    let dir = match std::env::var_os(paths::CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::config_dir()?.join(paths::APP_DIR),
    };
    Some(dir.join(paths::CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "mirror_preview": false }"#).unwrap();
        assert!(!config.mirror_preview);
        assert_eq!(config.output_format, PhotoOutputFormat::Jpeg);
        assert!(config.virtual_sources.is_empty());
    }

    #[test]
    fn test_photo_directory_override() {
        let config = Config {
            photo_dir: Some(PathBuf::from("/tmp/shots")),
            ..Default::default()
        };
        assert_eq!(config.photo_directory(), PathBuf::from("/tmp/shots"));
    }
}
