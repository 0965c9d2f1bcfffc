// SPDX-License-Identifier: GPL-3.0-only

//! Photo collection abstraction
//!
//! The camera screen never touches files itself. It asks a
//! [`PhotoCollectionStore`] to load the stored photos, to produce a thumbnail
//! of the newest one, and to persist freshly captured frames.

pub mod collection;

pub use collection::PhotoCollection;

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoResult;
use chrono::{DateTime, Local};
use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;

/// One stored photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    pub size_bytes: u64,
}

impl PhotoAsset {
    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Small RGBA rendition of the newest photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Photo the thumbnail was generated from
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Packed RGBA pixels
    pub rgba: Arc<Vec<u8>>,
}

impl Thumbnail {
    /// RGB triple at (x, y), clamped to the thumbnail bounds
    pub fn pixel_rgb(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let idx = ((y * self.width + x) * 4) as usize;
        match self.rgba.get(idx..idx + 3) {
            Some(px) => (px[0], px[1], px[2]),
            None => (0, 0, 0),
        }
    }
}

/// Owner of the previously captured photos
///
/// Implementations synchronize internally; all methods take `&self`.
pub trait PhotoCollectionStore: Send + Sync {
    /// Populate the internal photo list from persistent storage
    fn load_all(&self) -> BoxFuture<'_, PhotoResult<()>>;

    /// Thumbnail of the most recent photo, `None` when there are no photos
    fn load_thumbnail(&self) -> BoxFuture<'_, PhotoResult<Option<Thumbnail>>>;

    /// Persist a captured frame as a new photo
    fn add_photo(&self, frame: Arc<CameraFrame>) -> BoxFuture<'_, PhotoResult<PhotoAsset>>;

    /// Snapshot of the loaded photos, newest first
    fn photos(&self) -> Vec<PhotoAsset>;
}
