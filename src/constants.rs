// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JPEG quality presets
///
/// Users choose between file size and quality. PNG output ignores this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QualityPreset {
    /// Smaller files, visible artifacts
    Low,
    /// Balanced quality and file size
    Medium,
    /// Larger files, better quality (default)
    #[default]
    High,
    /// Minimal compression
    Maximum,
}

impl QualityPreset {
    /// All preset variants for UI iteration
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Low,
        QualityPreset::Medium,
        QualityPreset::High,
        QualityPreset::Maximum,
    ];

    /// Display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
            QualityPreset::Maximum => "Maximum",
        }
    }

    /// JPEG quality value (0-100)
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            QualityPreset::Low => 60,
            QualityPreset::Medium => 80,
            QualityPreset::High => 92,
            QualityPreset::Maximum => 98,
        }
    }
}

/// Camera screen layout constants
pub mod ui {
    /// Fraction of the screen height taken by each chrome bar (top and bottom)
    pub const BAR_HEIGHT_FACTOR: f32 = 0.15;

    /// Opacity of the black chrome bars drawn over the preview
    pub const BAR_OPACITY: f32 = 0.75;

    /// Horizontal spacing between the bottom bar controls
    pub const CONTROL_SPACING: f32 = 60.0;

    /// Shutter ring diameter
    pub const SHUTTER_OUTER: f32 = 62.0;

    /// Shutter inner disc diameter
    pub const SHUTTER_INNER: f32 = 50.0;

    /// Shutter ring stroke width
    pub const SHUTTER_RING_WIDTH: f32 = 3.0;

    /// Camera switch glyph size
    pub const SWITCH_ICON_SIZE: f32 = 36.0;

    /// Accessibility label of the preview region
    pub const VIEWFINDER_LABEL: &str = "View Finder";

    /// Label of the gallery link
    pub const GALLERY_LABEL: &str = "Gallery";

    /// Label of the shutter button
    pub const SHUTTER_LABEL: &str = "Take Photo";

    /// Label of the camera switch button
    pub const SWITCH_LABEL: &str = "Switch Camera";

    /// Icon name of the camera switch button
    pub const SWITCH_ICON: &str = "arrow.triangle.2.circlepath";

    /// Icon shown in the gallery link before any photo exists
    pub const GALLERY_PLACEHOLDER_ICON: &str = "photo.on.rectangle";
}

/// Thumbnail generation
pub mod thumbnail {
    /// Longest edge of a generated thumbnail in pixels
    pub const MAX_EDGE: u32 = 128;
}

/// Supported photo file extensions
pub mod file_formats {
    /// Extensions picked up when scanning the photo directory
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

    /// Check if a file extension is a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

/// Capture and UI timing constants
pub mod timing {
    use super::Duration;

    /// Interval between preview frames of virtual devices (~30fps)
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

    /// How often a paused capture loop checks for resume or stop
    pub const PAUSE_CHECK_INTERVAL: Duration = Duration::from_millis(50);

    /// Longest wait for a state change before checking input again
    pub const UI_POLL_INTERVAL: Duration = Duration::from_millis(16);

    /// How long a status message stays in the terminal status line
    pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);
}

/// Directory and file names
pub mod paths {
    /// Application directory name under config, cache and pictures dirs
    pub const APP_DIR: &str = "snapcam";

    /// Config file name
    pub const CONFIG_FILE: &str = "config.json";

    /// Log file written in terminal mode
    pub const LOG_FILE: &str = "snapcam.log";

    /// Environment variable overriding the config directory
    pub const CONFIG_DIR_ENV: &str = "SNAPCAM_CONFIG_DIR";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_leave_room_for_viewfinder() {
        let viewfinder = 1.0 - ui::BAR_HEIGHT_FACTOR * 2.0;
        assert!(viewfinder > 0.5);
    }

    #[test]
    fn test_image_extension_case_insensitive() {
        assert!(file_formats::is_image_extension("JPG"));
        assert!(file_formats::is_image_extension("png"));
        assert!(!file_formats::is_image_extension("mp4"));
    }
}
