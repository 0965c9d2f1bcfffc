// SPDX-License-Identifier: GPL-3.0-only

//! Gallery screen state and view
//!
//! The gallery lists stored photos newest first. While it is showing, the
//! camera preview is paused.

use crate::photo_library::PhotoAsset;
use std::path::PathBuf;

/// Selection within the photo list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryState {
    selected: usize,
}

impl GalleryState {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select the newest photo again
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    pub fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Selected photo, clamped to the list
    pub fn selected_photo<'a>(&self, photos: &'a [PhotoAsset]) -> Option<&'a PhotoAsset> {
        photos.get(self.selected.min(photos.len().saturating_sub(1)))
    }
}

/// One row of the gallery list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub path: PathBuf,
    pub file_name: String,
    /// Modification time, `YYYY-MM-DD HH:MM`
    pub taken: String,
    pub size: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub entries: Vec<GalleryEntry>,
}

impl GalleryView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<&GalleryEntry> {
        self.entries.iter().find(|entry| entry.selected)
    }
}

/// Build the gallery list for a photo snapshot
pub fn render_gallery(photos: &[PhotoAsset], state: &GalleryState) -> GalleryView {
    let selected = state.selected.min(photos.len().saturating_sub(1));
    let entries = photos
        .iter()
        .enumerate()
        .map(|(index, photo)| GalleryEntry {
            path: photo.path.clone(),
            file_name: photo.file_name(),
            taken: photo.modified.format("%Y-%m-%d %H:%M").to_string(),
            size: format_size(photo.size_bytes),
            selected: index == selected,
        })
        .collect();
    GalleryView { entries }
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    match bytes {
        b if b >= MIB => format!("{:.1} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.1} KiB", b as f64 / KIB as f64),
        b => format!("{} B", b),
    }
}
