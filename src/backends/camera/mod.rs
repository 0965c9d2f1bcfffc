// SPDX-License-Identifier: MPL-2.0

//! Camera controller abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │  UI Layer (Screen)  │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │CameraController Trait│  ← Contract the screen relies on
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    CameraManager    │  ← Session, device switching, pause
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ Capture loop thread │  ← Pulls frames from a FrameSource
//! └─────────────────────┘
//! ```

pub mod frame_loop;
pub mod manager;
pub mod types;

pub use manager::CameraManager;
pub use types::*;

use futures::future::BoxFuture;
use std::sync::Arc;

/// Owner of the capture session
///
/// Async operations return boxed futures so the trait can be used as
/// `Arc<dyn CameraController>`. Implementations synchronize internally.
pub trait CameraController: Send + Sync {
    /// Open the current device and start publishing preview frames
    ///
    /// Starting an already running session is a no-op.
    fn start(&self) -> BoxFuture<'_, BackendResult<()>>;

    /// Stop the session and release the device
    fn stop(&self) -> BoxFuture<'_, BackendResult<()>>;

    /// Capture a still frame
    fn take_photo(&self) -> BoxFuture<'_, BackendResult<Arc<CameraFrame>>>;

    /// Move to the next capture device
    ///
    /// With a single device this is a no-op and returns `Ok(())`.
    fn switch_capture_device(&self) -> BoxFuture<'_, BackendResult<()>>;

    /// Whether preview publishing is paused
    fn is_preview_paused(&self) -> bool;

    /// Pause or resume preview publishing
    ///
    /// While paused the session must not consume capture resources.
    fn set_preview_paused(&self, paused: bool);

    /// Subscribe to the latest preview frame
    fn preview_frames(&self) -> FrameReceiver;

    /// Devices the controller can switch between
    fn available_devices(&self) -> Vec<CameraDevice>;

    /// Device currently selected
    fn current_device(&self) -> Option<CameraDevice>;
}
