// SPDX-License-Identifier: MPL-2.0

//! Camera screen application layer
//!
//! # Architecture
//!
//! - `state`: Navigation, camera status and the render snapshot
//! - `view_model`: Collaborator calls and observable state
//! - `screen`: The camera screen (render, lifecycle and control handlers)
//! - `ui`: Plain UI tree produced by rendering
//! - `camera_preview`: Viewfinder content
//! - `controls`: Capture button
//! - `bottom_bar`: Gallery button and camera switcher
//! - `gallery`: Gallery list state and view
//!
//! # Main Types
//!
//! - `CameraScreen`: Owns the view model and the navigation state
//! - `ViewModel`: Talks to the `CameraController` and `PhotoCollectionStore`
//! - `CameraView`: What the camera screen shows for a given `ViewState`

mod bottom_bar;
mod camera_preview;
mod controls;
pub mod gallery;
pub mod screen;
pub mod state;
pub mod ui;
pub mod view_model;

pub use gallery::{GalleryEntry, GalleryState, GalleryView, render_gallery};
pub use screen::CameraScreen;
pub use state::{CameraStatus, FrameHandle, NavEvent, Screen, ViewState, transition};
pub use ui::{Action, CameraView, Control, Icon, ViewfinderContent};
pub use view_model::{StateSubscription, ViewModel};
