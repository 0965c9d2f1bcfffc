// SPDX-License-Identifier: MPL-2.0

//! Camera screen UI tree
//!
//! Rendering produces this plain description of the screen. Front ends
//! (the terminal viewer, tests) draw or inspect it; nothing in here touches
//! the camera or the photo store.

use crate::app::state::FrameHandle;
use crate::constants::ui;
use crate::photo_library::Thumbnail;

/// Complete camera screen
#[derive(Debug, Clone, PartialEq)]
pub struct CameraView {
    pub top_bar: ChromeBar,
    pub viewfinder: Viewfinder,
    pub bottom_bar: BottomBar,
}

impl CameraView {
    /// Controls in left to right order
    pub fn controls(&self) -> [&Control; 3] {
        [
            &self.bottom_bar.gallery,
            &self.bottom_bar.shutter,
            &self.bottom_bar.switch_camera,
        ]
    }

    /// Look up a control by its action
    pub fn control(&self, action: Action) -> &Control {
        match action {
            Action::OpenGallery => &self.bottom_bar.gallery,
            Action::TakePhoto => &self.bottom_bar.shutter,
            Action::SwitchCamera => &self.bottom_bar.switch_camera,
        }
    }
}

/// Semi-transparent black bar over the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeBar {
    /// Fraction of the screen height
    pub height_factor: f32,
    pub opacity: f32,
}

impl Default for ChromeBar {
    fn default() -> Self {
        Self {
            height_factor: ui::BAR_HEIGHT_FACTOR,
            opacity: ui::BAR_OPACITY,
        }
    }
}

/// Preview region between the bars
#[derive(Debug, Clone, PartialEq)]
pub struct Viewfinder {
    pub content: ViewfinderContent,
    pub accessibility_label: &'static str,
}

/// What the preview region shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewfinderContent {
    /// Latest camera frame
    Live { frame: FrameHandle, mirrored: bool },
    /// Session starting, no frame yet
    Waiting,
    /// Preview paused while the gallery is open
    Paused,
    /// Camera could not be started
    Unavailable(String),
}

/// Bottom bar with the three controls
#[derive(Debug, Clone, PartialEq)]
pub struct BottomBar {
    pub bar: ChromeBar,
    /// Horizontal spacing between controls
    pub spacing: f32,
    pub gallery: Control,
    pub shutter: Control,
    pub switch_camera: Control,
}

/// A pressable control
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub action: Action,
    /// Accessibility label, the controls render icon-only
    pub label: &'static str,
    pub icon: Icon,
    pub enabled: bool,
}

/// Control icons
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    /// Thumbnail of the newest photo
    Thumbnail(Thumbnail),
    /// Named symbol
    Symbol { name: &'static str, size: f32 },
    /// Shutter: white ring around a white disc
    ShutterRing {
        outer: f32,
        inner: f32,
        ring_width: f32,
    },
}

/// User actions a control triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenGallery,
    TakePhoto,
    SwitchCamera,
}

/// Split a screen height into top bar, viewfinder and bottom bar rows
///
/// Each bar gets [`ui::BAR_HEIGHT_FACTOR`] of the height (at least one row
/// when the screen has room for all three regions).
pub fn layout_rows(height: u16) -> [u16; 3] {
    if height < 3 {
        return [0, height, 0];
    }
    let bar = ((height as f32 * ui::BAR_HEIGHT_FACTOR).round() as u16).max(1);
    [bar, height - bar * 2, bar]
}
