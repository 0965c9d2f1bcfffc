// SPDX-License-Identifier: GPL-3.0-only

//! Camera preview (viewfinder) region

use crate::app::state::{CameraStatus, ViewState};
use crate::app::ui::{Viewfinder, ViewfinderContent};
use crate::constants::ui;

impl ViewState {
    /// Build the viewfinder
    ///
    /// A failed camera wins over everything else, then the paused state, so
    /// a stale frame is never shown while the gallery is open.
    pub fn build_viewfinder(&self) -> Viewfinder {
        let content = match (&self.camera_status, self.preview_paused, &self.preview_frame) {
            (CameraStatus::Unavailable(e), _, _) => ViewfinderContent::Unavailable(e.to_string()),
            (_, true, _) => ViewfinderContent::Paused,
            (_, false, Some(frame)) => ViewfinderContent::Live {
                frame: frame.clone(),
                mirrored: self.mirror_preview,
            },
            (_, false, None) => ViewfinderContent::Waiting,
        };

        Viewfinder {
            content,
            accessibility_label: ui::VIEWFINDER_LABEL,
        }
    }
}
