// SPDX-License-Identifier: GPL-3.0-only

//! Still image presented as a camera feed

use super::FrameSource;
use crate::backends::camera::types::{BackendError, BackendResult, CameraFormat, CameraFrame};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Streams one decoded image over and over
pub struct ImageFileSource {
    frame: CameraFrame,
    format: CameraFormat,
}

impl ImageFileSource {
    /// Decode `path` once, fitted inside the requested format
    pub fn open(path: &Path, format: CameraFormat) -> BackendResult<Self> {
        let img = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => BackendError::from(io),
            other => BackendError::DeviceUnavailable(format!("{}: {}", path.display(), other)),
        })?;

        let fitted = img.thumbnail(format.width, format.height).to_rgba8();
        let (width, height) = fitted.dimensions();

        let frame = CameraFrame::from_rgba(width, height, fitted.into_raw(), 0).ok_or_else(|| {
            BackendError::DeviceUnavailable(format!("{}: empty image", path.display()))
        })?;

        info!(path = %path.display(), width, height, "Image source opened");

        Ok(Self {
            frame,
            format: CameraFormat {
                width,
                height,
                framerate: format.framerate,
            },
        })
    }
}

impl FrameSource for ImageFileSource {
    fn next_frame(&mut self, sequence: u64) -> BackendResult<CameraFrame> {
        Ok(CameraFrame {
            data: Arc::clone(&self.frame.data),
            sequence,
            captured_at: Instant::now(),
            ..self.frame.clone()
        })
    }

    fn format(&self) -> CameraFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_fitted_into_format() {
        let path = std::env::temp_dir().join(format!("snapcam-source-{}.png", std::process::id()));
        image::RgbaImage::from_pixel(200, 100, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let format = CameraFormat {
            width: 40,
            height: 40,
            framerate: 30,
        };
        let mut source = ImageFileSource::open(&path, format).unwrap();
        let frame = source.next_frame(9).unwrap();
        assert_eq!((frame.width, frame.height), (40, 20));
        assert_eq!(frame.sequence, 9);
        assert_eq!(frame.pixel_rgb(0, 0), (1, 2, 3));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = ImageFileSource::open(Path::new("/nonexistent/x.png"), CameraFormat::default());
        assert!(matches!(result, Err(BackendError::DeviceNotFound(_))));
    }
}
