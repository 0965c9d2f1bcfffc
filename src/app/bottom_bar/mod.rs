// SPDX-License-Identifier: GPL-3.0-only

//! Bottom bar module
//!
//! This module handles the bottom control bar UI components:
//! - Gallery button (with thumbnail)
//! - Capture button (see `controls`)
//! - Camera switcher (flip cameras)

pub mod camera_switcher;
pub mod gallery_button;

use crate::app::state::ViewState;
use crate::app::ui::{BottomBar, ChromeBar};
use crate::constants::ui;

impl ViewState {
    /// Build the complete bottom bar
    ///
    /// Gallery link, shutter and camera switcher, left to right, on a
    /// translucent bar matching the top bar.
    pub fn build_bottom_bar(&self) -> BottomBar {
        BottomBar {
            bar: ChromeBar::default(),
            spacing: ui::CONTROL_SPACING,
            gallery: self.build_gallery_button(),
            shutter: self.build_capture_button(),
            switch_camera: self.build_camera_switcher(),
        }
    }
}
