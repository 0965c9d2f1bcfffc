// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for managing photo files and thumbnails

use crate::constants::{file_formats, paths, thumbnail};
use crate::errors::{PhotoError, PhotoResult};
use crate::photo_library::{PhotoAsset, Thumbnail};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Default photo directory, `~/Pictures/snapcam`
pub fn default_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(paths::APP_DIR)
}

/// Scan a directory for photos, newest first
///
/// Non-image files and unreadable entries are skipped. A missing directory
/// yields an empty list.
pub fn scan_photos(dir: &Path) -> Vec<PhotoAsset> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        debug!(path = %dir.display(), "Photo directory not readable");
        return Vec::new();
    };

    let mut photos: Vec<PhotoAsset> = entries
        .flatten()
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| file_formats::is_image_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            Some(PhotoAsset {
                path: entry.path(),
                modified: metadata.modified().ok()?.into(),
                size_bytes: metadata.len(),
            })
        })
        .collect();

    // Newest first, file name breaks ties so equal mtimes stay stable
    photos.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| b.path.cmp(&a.path))
    });
    photos
}

/// Load a thumbnail for a photo
///
/// Decoding and downscaling run on the blocking pool.
pub async fn load_thumbnail(path: PathBuf) -> PhotoResult<Thumbnail> {
    debug!(path = %path.display(), "Loading thumbnail");

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| PhotoError::LoadFailed(format!("{}: {}", path.display(), e)))?;

    tokio::task::spawn_blocking(move || decode_thumbnail(path, &bytes))
        .await
        .map_err(|e| PhotoError::LoadFailed(format!("Thumbnail task error: {}", e)))?
}

/// Decode image bytes into a thumbnail no larger than [`thumbnail::MAX_EDGE`]
///
/// Images already within the limit keep their size.
pub fn decode_thumbnail(path: PathBuf, bytes: &[u8]) -> PhotoResult<Thumbnail> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PhotoError::LoadFailed(format!("{}: {}", path.display(), e)))?;

    let rgba = if img.width().max(img.height()) > thumbnail::MAX_EDGE {
        img.thumbnail(thumbnail::MAX_EDGE, thumbnail::MAX_EDGE).to_rgba8()
    } else {
        img.to_rgba8()
    };
    let (width, height) = rgba.dimensions();

    Ok(Thumbnail {
        path,
        width,
        height,
        rgba: Arc::new(rgba.into_raw()),
    })
}

/// Create a new, empty photo file `IMG_<timestamp>.<ext>` in `dir`
///
/// Captures within the same second get `_1`, `_2`, ... suffixes. Files are
/// created with `create_new`, so concurrent saves never share a path.
pub fn create_photo_file(dir: &Path, extension: &str) -> std::io::Result<(PathBuf, File)> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let mut suffix = 0u32;
    loop {
        let name = match suffix {
            0 => format!("IMG_{}.{}", timestamp, extension),
            n => format!("IMG_{}_{}.{}", timestamp, n, extension),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => return Err(e),
        }
    }
}
