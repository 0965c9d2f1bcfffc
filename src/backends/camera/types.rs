// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Which way a capture device faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraPosition {
    /// Facing away from the user
    #[default]
    Back,
    /// Facing the user (selfie camera)
    Front,
    /// Anything else (file sources, external devices)
    External,
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Back => write!(f, "back"),
            CameraPosition::Front => write!(f, "front"),
            CameraPosition::External => write!(f, "external"),
        }
    }
}

/// Where a device's frames come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceSource {
    /// Generated test pattern, the number selects the pattern
    TestPattern(u8),
    /// A still image on disk shown as a live feed
    ImageFile(PathBuf),
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    pub path: String, // Stable identifier, persisted as the last used camera
    pub position: CameraPosition,
    pub source: DeviceSource,
}

/// Capture format of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
    pub framerate: u32,
}

impl std::fmt::Display for CameraFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} @ {}fps", self.width, self.height, self.framerate)
    }
}

impl Default for CameraFormat {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            framerate: 30,
        }
    }
}

/// A single RGBA frame from the camera
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA pixels (4 bytes per pixel)
    pub data: Arc<[u8]>,
    /// Row stride in bytes
    pub stride: u32,
    /// Position in the stream, increases by one per published frame
    pub sequence: u64,
    /// Timestamp when frame was captured (for latency diagnostics)
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Build a frame from packed RGBA bytes
    ///
    /// Returns `None` if the buffer does not hold `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>, sequence: u64) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != (width * height * 4) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data: Arc::from(data),
            stride: width * 4,
            sequence,
            captured_at: Instant::now(),
        })
    }

    /// RGB triple at (x, y), clamped to the frame bounds
    pub fn pixel_rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let idx = (y * self.stride + x * 4) as usize;
        if idx + 2 < self.data.len() {
            (self.data[idx], self.data[idx + 1], self.data[idx + 2])
        } else {
            (0, 0, 0)
        }
    }

    /// Copy into an `image` RGBA buffer for encoding
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.to_vec())
    }
}

/// Receiver side of the preview stream
///
/// Always holds the latest published frame; `None` until the first frame
/// arrives or after the session stops.
pub type FrameReceiver = tokio::sync::watch::Receiver<Option<Arc<CameraFrame>>>;

/// Sender side of the preview stream
pub type FrameSender = tokio::sync::watch::Sender<Option<Arc<CameraFrame>>>;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The user or platform refused camera access
    PermissionDenied,
    /// The device exists but cannot be opened right now
    DeviceUnavailable(String),
    /// No device matches the request
    DeviceNotFound(String),
    /// Operation needs a running session
    NotStarted,
    /// Session is running but has not produced a frame yet
    NoFrameAvailable,
    /// Failed to initialize the session
    InitializationFailed(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::PermissionDenied => write!(f, "Camera access denied"),
            BackendError::DeviceUnavailable(msg) => write!(f, "Device unavailable: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::NotStarted => write!(f, "Camera session not started"),
            BackendError::NoFrameAvailable => write!(f, "No frame available for capture"),
            BackendError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => BackendError::PermissionDenied,
            std::io::ErrorKind::NotFound => BackendError::DeviceNotFound(err.to_string()),
            _ => BackendError::DeviceUnavailable(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_rejects_short_buffer() {
        assert!(CameraFrame::from_rgba(2, 2, vec![0; 15], 0).is_none());
        assert!(CameraFrame::from_rgba(0, 2, Vec::new(), 0).is_none());
    }

    #[test]
    fn test_pixel_rgb_clamps() {
        let mut data = vec![0u8; 2 * 1 * 4];
        data[4..8].copy_from_slice(&[10, 20, 30, 255]);
        let frame = CameraFrame::from_rgba(2, 1, data, 7).unwrap();
        assert_eq!(frame.pixel_rgb(1, 0), (10, 20, 30));
        assert_eq!(frame.pixel_rgb(50, 50), (10, 20, 30));
        assert_eq!(frame.sequence, 7);
    }

    #[test]
    fn test_io_permission_maps_to_permission_denied() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(BackendError::from(io), BackendError::PermissionDenied);
    }
}
