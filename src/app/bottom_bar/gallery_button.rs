// SPDX-License-Identifier: MPL-2.0

//! Gallery button

use crate::app::state::ViewState;
use crate::app::ui::{Action, Control, Icon};
use crate::constants::ui;

impl ViewState {
    /// Build the gallery button
    ///
    /// Shows the newest photo's thumbnail if available, otherwise a
    /// placeholder symbol. Stays enabled when the camera is unavailable so
    /// stored photos remain reachable.
    pub fn build_gallery_button(&self) -> Control {
        let icon = match &self.thumbnail {
            Some(thumbnail) => Icon::Thumbnail(thumbnail.clone()),
            None => Icon::Symbol {
                name: ui::GALLERY_PLACEHOLDER_ICON,
                size: ui::SWITCH_ICON_SIZE,
            },
        };

        Control {
            action: Action::OpenGallery,
            label: ui::GALLERY_LABEL,
            icon,
            enabled: true,
        }
    }
}
