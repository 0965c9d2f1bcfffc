// SPDX-License-Identifier: GPL-3.0-only

//! View model between the camera screen and its collaborators
//!
//! Holds the camera controller and the photo store, keeps the thumbnail,
//! camera status and status-line notice in `watch` channels, and runs every
//! collaborator call as a tracked background task. Dropping the view model
//! (or calling [`ViewModel::teardown`]) aborts tasks still in flight, so no
//! state is written after disposal.

use crate::app::state::{CameraStatus, FrameHandle, ViewState};
use crate::backends::camera::{CameraController, CameraPosition, FrameReceiver};
use crate::photo_library::{PhotoCollectionStore, Thumbnail};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// State owned by the view model, shared with its tasks
struct Observed {
    thumbnail: watch::Sender<Option<Thumbnail>>,
    status: watch::Sender<CameraStatus>,
    notice: watch::Sender<Option<String>>,
}

pub struct ViewModel {
    camera: Arc<dyn CameraController>,
    photos: Arc<dyn PhotoCollectionStore>,
    preview: FrameReceiver,
    observed: Arc<Observed>,
    tasks: Mutex<JoinSet<()>>,
    mirror_front: bool,
}

impl ViewModel {
    pub fn new(camera: Arc<dyn CameraController>, photos: Arc<dyn PhotoCollectionStore>) -> Self {
        let preview = camera.preview_frames();
        Self {
            camera,
            photos,
            preview,
            observed: Arc::new(Observed {
                thumbnail: watch::channel(None).0,
                status: watch::channel(CameraStatus::default()).0,
                notice: watch::channel(None).0,
            }),
            tasks: Mutex::new(JoinSet::new()),
            mirror_front: true,
        }
    }

    /// Mirror the preview of front-facing devices (default on)
    pub fn with_mirror(mut self, mirror_front: bool) -> Self {
        self.mirror_front = mirror_front;
        self
    }

    pub fn camera(&self) -> &Arc<dyn CameraController> {
        &self.camera
    }

    pub fn photos(&self) -> &Arc<dyn PhotoCollectionStore> {
        &self.photos
    }

    /// Startup sequence: session start, then collection and thumbnail loads
    ///
    /// The loads run concurrently but are only issued once start resolved,
    /// whether it succeeded or not.
    pub fn on_appear(&self) {
        let camera = Arc::clone(&self.camera);
        let photos = Arc::clone(&self.photos);
        let observed = Arc::clone(&self.observed);

        self.spawn(async move {
            info!("Starting camera session");
            match camera.start().await {
                Ok(()) => {
                    observed.status.send_replace(CameraStatus::Running);
                }
                Err(e) => {
                    error!(error = %e, "Failed to start camera");
                    observed.status.send_replace(CameraStatus::Unavailable(e));
                }
            }

            let (loaded, thumbnail) = tokio::join!(photos.load_all(), photos.load_thumbnail());
            if let Err(e) = loaded {
                warn!(error = %e, "Failed to load photo collection");
            }
            match thumbnail {
                Ok(thumbnail) => {
                    observed.thumbnail.send_replace(thumbnail);
                }
                Err(e) => warn!(error = %e, "Failed to load thumbnail"),
            }
        });
    }

    /// Request one photo capture
    ///
    /// Returns false when the request was not issued because the camera is
    /// unavailable. The result is reported through the notice and thumbnail.
    pub fn take_photo(&self) -> bool {
        if self.observed.status.borrow().is_unavailable() {
            debug!("Shutter ignored, camera unavailable");
            return false;
        }

        let camera = Arc::clone(&self.camera);
        let photos = Arc::clone(&self.photos);
        let observed = Arc::clone(&self.observed);

        self.spawn(async move {
            let frame = match camera.take_photo().await {
                Ok(frame) => frame,
                Err(e) => {
                    warn!(error = %e, "Photo capture failed");
                    observed
                        .notice
                        .send_replace(Some(format!("Capture failed: {}", e)));
                    return;
                }
            };

            match photos.add_photo(frame).await {
                Ok(asset) => {
                    info!(path = %asset.path.display(), "Photo stored");
                    observed
                        .notice
                        .send_replace(Some(format!("Saved: {}", asset.file_name())));
                    refresh_thumbnail(photos.as_ref(), &observed).await;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to store photo");
                    observed.notice.send_replace(Some(e.to_string()));
                }
            }
        });
        true
    }

    /// Request a switch to the next capture device
    pub fn switch_camera(&self) {
        let camera = Arc::clone(&self.camera);
        let observed = Arc::clone(&self.observed);

        self.spawn(async move {
            if let Err(e) = camera.switch_capture_device().await {
                warn!(error = %e, "Camera switch failed");
                observed
                    .notice
                    .send_replace(Some(format!("Switch failed: {}", e)));
            }
        });
    }

    /// Forward the preview paused flag to the controller
    pub fn set_preview_paused(&self, paused: bool) {
        self.camera.set_preview_paused(paused);
    }

    /// Reload the photo list and thumbnail (gallery entry)
    pub fn refresh_photos(&self) {
        let photos = Arc::clone(&self.photos);
        let observed = Arc::clone(&self.observed);

        self.spawn(async move {
            if let Err(e) = photos.load_all().await {
                warn!(error = %e, "Failed to reload photo collection");
            }
            refresh_thumbnail(photos.as_ref(), &observed).await;
        });
    }

    pub fn clear_notice(&self) {
        self.observed.notice.send_replace(None);
    }

    /// Snapshot of the current observable state
    pub fn snapshot(&self) -> ViewState {
        let mirror_preview = self.mirror_front
            && self
                .camera
                .current_device()
                .is_some_and(|device| device.position == CameraPosition::Front);

        ViewState {
            preview_frame: self.preview.borrow().clone().map(FrameHandle),
            thumbnail: self.observed.thumbnail.borrow().clone(),
            preview_paused: self.camera.is_preview_paused(),
            camera_status: self.observed.status.borrow().clone(),
            mirror_preview,
            notice: self.observed.notice.borrow().clone(),
        }
    }

    /// Subscribe to changes of any observable value
    pub fn subscribe(&self) -> StateSubscription {
        StateSubscription {
            preview: self.preview.clone(),
            thumbnail: self.observed.thumbnail.subscribe(),
            status: self.observed.status.subscribe(),
            notice: self.observed.notice.subscribe(),
        }
    }

    /// Wait for every task issued so far to finish
    pub async fn settle(&self) {
        let mut tasks = std::mem::take(&mut *self.tasks.lock().unwrap());
        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result
                && e.is_panic()
            {
                error!(error = %e, "View model task panicked");
            }
        }
    }

    /// Abort tasks still in flight
    pub fn teardown(&self) {
        let mut tasks = self.tasks.lock().unwrap();
        if !tasks.is_empty() {
            debug!(count = tasks.len(), "Aborting pending view model tasks");
        }
        tasks.abort_all();
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock().unwrap();
        // Reap finished tasks so the set does not grow with every press
        while tasks.try_join_next().is_some() {}
        tasks.spawn(task);
    }
}

async fn refresh_thumbnail(photos: &dyn PhotoCollectionStore, observed: &Observed) {
    match photos.load_thumbnail().await {
        Ok(thumbnail) => {
            observed.thumbnail.send_replace(thumbnail);
        }
        Err(e) => warn!(error = %e, "Failed to refresh thumbnail"),
    }
}

/// Change notifications for the camera screen
pub struct StateSubscription {
    preview: FrameReceiver,
    thumbnail: watch::Receiver<Option<Thumbnail>>,
    status: watch::Receiver<CameraStatus>,
    notice: watch::Receiver<Option<String>>,
}

impl StateSubscription {
    /// Wait until any observed value changes
    ///
    /// Returns false when the changed source has been dropped.
    pub async fn changed(&mut self) -> bool {
        tokio::select! {
            r = self.preview.changed() => r.is_ok(),
            r = self.thumbnail.changed() => r.is_ok(),
            r = self.status.changed() => r.is_ok(),
            r = self.notice.changed() => r.is_ok(),
        }
    }
}
