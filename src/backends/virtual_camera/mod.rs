// SPDX-License-Identifier: GPL-3.0-only

//! Virtual camera devices
//!
//! Frame sources that need no hardware: generated test patterns standing in
//! for the back and front cameras, plus still images from disk presented as
//! additional devices. Everything downstream of [`FrameSource`] treats them
//! like real sensors.

pub mod file_source;
pub mod pattern;

pub use file_source::ImageFileSource;
pub use pattern::TestPatternSource;

use crate::backends::camera::types::{
    BackendResult, CameraDevice, CameraFormat, CameraFrame, CameraPosition, DeviceSource,
};
use std::path::PathBuf;
use tracing::debug;

/// Produces frames for one device
///
/// Called from the capture thread only; implementations may block.
pub trait FrameSource: Send {
    /// Produce the next frame, stamped with `sequence`
    fn next_frame(&mut self, sequence: u64) -> BackendResult<CameraFrame>;

    /// Format of produced frames
    fn format(&self) -> CameraFormat;
}

/// List all virtual devices
///
/// The two pattern cameras always exist; each configured image adds one
/// external device.
pub fn enumerate_devices(image_sources: &[PathBuf]) -> Vec<CameraDevice> {
    let mut devices = vec![
        CameraDevice {
            name: "Back Camera".to_string(),
            path: "virtual:back".to_string(),
            position: CameraPosition::Back,
            source: DeviceSource::TestPattern(0),
        },
        CameraDevice {
            name: "Front Camera".to_string(),
            path: "virtual:front".to_string(),
            position: CameraPosition::Front,
            source: DeviceSource::TestPattern(1),
        },
    ];

    devices.extend(image_sources.iter().map(|path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        CameraDevice {
            name,
            path: format!("file:{}", path.display()),
            position: CameraPosition::External,
            source: DeviceSource::ImageFile(path.clone()),
        }
    }));

    debug!(count = devices.len(), "Enumerated virtual cameras");
    devices
}

/// Open the frame source behind a device
pub fn open_source(device: &CameraDevice, format: CameraFormat) -> BackendResult<Box<dyn FrameSource>> {
    match &device.source {
        DeviceSource::TestPattern(pattern) => Ok(Box::new(TestPatternSource::new(*pattern, format))),
        DeviceSource::ImageFile(path) => Ok(Box::new(ImageFileSource::open(path, format)?)),
    }
}
