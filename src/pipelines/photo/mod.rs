// SPDX-License-Identifier: MPL-2.0

//! Async photo save pipeline
//!
//! ```text
//! Captured frame → Encoding (blocking pool) → Disk I/O (blocking pool)
//!       ↓
//! Preview continues uninterrupted
//! ```

pub mod encoding;

pub use encoding::{EncodedImage, EncodingFormat, PhotoEncoder};

use crate::backends::camera::types::CameraFrame;
use crate::config::Config;
use crate::constants::QualityPreset;
use crate::errors::PhotoResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Encode-and-save workflow for captured frames
#[derive(Debug, Clone, Default)]
pub struct PhotoPipeline {
    encoder: PhotoEncoder,
}

impl PhotoPipeline {
    /// Create a new photo pipeline with default settings (JPEG, high quality)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with explicit format and quality
    pub fn with_settings(format: EncodingFormat, quality: QualityPreset) -> Self {
        let mut encoder = PhotoEncoder::new();
        encoder.set_format(format);
        encoder.set_quality(quality);
        Self { encoder }
    }

    /// Create a pipeline from the user config
    pub fn from_config(config: &Config) -> Self {
        Self::with_settings(config.output_format.into(), config.quality)
    }

    /// Encode and save a frame, returning the written path
    pub async fn capture_and_save(
        &self,
        frame: Arc<CameraFrame>,
        output_dir: &Path,
    ) -> PhotoResult<PathBuf> {
        let encoded = self.encoder.encode(frame).await?;
        self.encoder.save(encoded, output_dir).await
    }
}
