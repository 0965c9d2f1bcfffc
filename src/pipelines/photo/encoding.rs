// SPDX-License-Identifier: GPL-3.0-only

//! Async photo encoding
//!
//! Encodes RGBA camera frames as JPEG (with quality control) or PNG and
//! writes them to disk. All work runs on the blocking pool.

use crate::backends::camera::types::CameraFrame;
use crate::config::PhotoOutputFormat;
use crate::constants::QualityPreset;
use crate::errors::{PhotoError, PhotoResult};
use image::DynamicImage;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Supported encoding formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingFormat {
    /// JPEG format (lossy compression)
    Jpeg,
    /// PNG format (lossless compression)
    Png,
}

impl EncodingFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            EncodingFormat::Jpeg => "jpg",
            EncodingFormat::Png => "png",
        }
    }
}

impl From<PhotoOutputFormat> for EncodingFormat {
    fn from(format: PhotoOutputFormat) -> Self {
        match format {
            PhotoOutputFormat::Jpeg => EncodingFormat::Jpeg,
            PhotoOutputFormat::Png => EncodingFormat::Png,
        }
    }
}

/// Encoded image data ready for saving
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: EncodingFormat,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
#[derive(Debug, Clone)]
pub struct PhotoEncoder {
    format: EncodingFormat,
    quality: QualityPreset,
}

impl PhotoEncoder {
    /// Create a new encoder with JPEG format and high quality
    pub fn new() -> Self {
        Self {
            format: EncodingFormat::Jpeg,
            quality: QualityPreset::High,
        }
    }

    /// Set encoding format
    pub fn set_format(&mut self, format: EncodingFormat) {
        self.format = format;
    }

    /// Set encoding quality (only affects JPEG)
    pub fn set_quality(&mut self, quality: QualityPreset) {
        self.quality = quality;
    }

    /// Encode a frame asynchronously
    pub async fn encode(&self, frame: Arc<CameraFrame>) -> PhotoResult<EncodedImage> {
        info!(
            width = frame.width,
            height = frame.height,
            format = ?self.format,
            "Starting encoding"
        );

        let format = self.format;
        let quality = self.quality;

        tokio::task::spawn_blocking(move || {
            let rgba = frame.to_rgba_image().ok_or_else(|| {
                PhotoError::EncodingFailed("Frame buffer does not match its dimensions".into())
            })?;

            let data = match format {
                EncodingFormat::Jpeg => Self::encode_jpeg(rgba, quality)?,
                EncodingFormat::Png => Self::encode_png(rgba)?,
            };

            debug!(size = data.len(), "Encoding complete");

            Ok(EncodedImage {
                data,
                format,
                width: frame.width,
                height: frame.height,
            })
        })
        .await
        .map_err(|e| PhotoError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }

    /// Save encoded image into `output_dir` under a timestamped name
    pub async fn save(&self, encoded: EncodedImage, output_dir: &Path) -> PhotoResult<PathBuf> {
        let output_dir = output_dir.to_path_buf();

        let filepath = tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&output_dir)?;
            let (filepath, mut file) =
                crate::storage::create_photo_file(&output_dir, encoded.format.extension())?;
            if let Err(e) = file.write_all(&encoded.data) {
                std::fs::remove_file(&filepath).ok();
                return Err(PhotoError::from(e));
            }
            Ok::<_, PhotoError>(filepath)
        })
        .await
        .map_err(|e| PhotoError::SaveFailed(format!("Save task error: {}", e)))??;

        info!(path = %filepath.display(), "Photo saved successfully");
        Ok(filepath)
    }

    /// JPEG has no alpha channel, so the frame is flattened to RGB first
    fn encode_jpeg(image: image::RgbaImage, quality: QualityPreset) -> PhotoResult<Vec<u8>> {
        let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());

        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

        Ok(buffer)
    }

    fn encode_png(image: image::RgbaImage) -> PhotoResult<Vec<u8>> {
        let mut buffer = Vec::new();

        image
            .write_to(
                &mut std::io::Cursor::new(&mut buffer),
                image::ImageFormat::Png,
            )
            .map_err(|e| PhotoError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

        Ok(buffer)
    }
}

impl Default for PhotoEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32) -> Arc<CameraFrame> {
        let data = [40u8, 120, 200, 255].repeat((width * height) as usize);
        Arc::new(CameraFrame::from_rgba(width, height, data, 0).unwrap())
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(EncodingFormat::Jpeg.extension(), "jpg");
        assert_eq!(EncodingFormat::Png.extension(), "png");
    }

    #[tokio::test]
    async fn test_jpeg_output_has_soi_marker() {
        let encoded = PhotoEncoder::new().encode(solid_frame(16, 8)).await.unwrap();
        assert_eq!(&encoded.data[..2], &[0xFF, 0xD8]);
        assert_eq!((encoded.width, encoded.height), (16, 8));
    }

    #[tokio::test]
    async fn test_png_decodes_to_same_size() {
        let mut encoder = PhotoEncoder::new();
        encoder.set_format(EncodingFormat::Png);
        let encoded = encoder.encode(solid_frame(5, 3)).await.unwrap();
        let decoded = image::load_from_memory(&encoded.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 3));
    }
}
