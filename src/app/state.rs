// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::camera::types::{BackendError, CameraFrame};
use crate::photo_library::Thumbnail;
use std::sync::Arc;

/// Screens the user can navigate between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Viewfinder with capture controls
    #[default]
    Camera,
    /// Stored photos
    Gallery,
}

impl Screen {
    /// The live preview is paused whenever the gallery is showing
    pub fn preview_paused(&self) -> bool {
        matches!(self, Screen::Gallery)
    }
}

/// Navigation events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    EnterGallery,
    ExitGallery,
}

/// Navigation transition function
///
/// Events that do not apply to the current screen leave it unchanged, so a
/// repeated enter or exit is harmless.
pub fn transition(screen: Screen, event: NavEvent) -> Screen {
    match (screen, event) {
        (Screen::Camera, NavEvent::EnterGallery) => Screen::Gallery,
        (Screen::Gallery, NavEvent::ExitGallery) => Screen::Camera,
        (current, _) => current,
    }
}

/// Camera session status as seen by the screen
///
/// Simple three-state design, no automatic retry after a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CameraStatus {
    /// Start requested, not confirmed yet
    #[default]
    Starting,
    /// Session running
    Running,
    /// Session start failed, capture controls are disabled
    Unavailable(BackendError),
}

impl CameraStatus {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CameraStatus::Unavailable(_))
    }
}

/// Shared preview frame compared by identity
///
/// Two handles are equal when they point at the same published frame, which
/// keeps rendering comparisons cheap.
#[derive(Debug, Clone)]
pub struct FrameHandle(pub Arc<CameraFrame>);

impl PartialEq for FrameHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for FrameHandle {
    type Target = CameraFrame;

    fn deref(&self) -> &CameraFrame {
        &self.0
    }
}

/// Snapshot of everything the camera screen renders from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Latest preview frame, if any arrived
    pub preview_frame: Option<FrameHandle>,
    /// Thumbnail of the newest photo
    pub thumbnail: Option<Thumbnail>,
    /// Preview paused (gallery showing)
    pub preview_paused: bool,
    pub camera_status: CameraStatus,
    /// Mirror the preview horizontally (front camera in selfie mode)
    pub mirror_preview: bool,
    /// Transient message for the status line
    pub notice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_exit_gallery() {
        let gallery = transition(Screen::Camera, NavEvent::EnterGallery);
        assert_eq!(gallery, Screen::Gallery);
        assert!(gallery.preview_paused());

        let camera = transition(gallery, NavEvent::ExitGallery);
        assert_eq!(camera, Screen::Camera);
        assert!(!camera.preview_paused());
    }

    #[test]
    fn test_redundant_events_keep_screen() {
        assert_eq!(transition(Screen::Camera, NavEvent::ExitGallery), Screen::Camera);
        assert_eq!(transition(Screen::Gallery, NavEvent::EnterGallery), Screen::Gallery);
    }

    #[test]
    fn test_frame_handle_identity() {
        let frame = Arc::new(CameraFrame::from_rgba(1, 1, vec![0; 4], 0).unwrap());
        let a = FrameHandle(Arc::clone(&frame));
        let b = FrameHandle(Arc::clone(&frame));
        let c = FrameHandle(Arc::new((*frame).clone()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
