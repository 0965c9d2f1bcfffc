// SPDX-License-Identifier: GPL-3.0-only

//! Camera session manager
//!
//! The manager provides:
//! - Session lifecycle (start, stop)
//! - Device switching with rollback to the previous device on failure
//! - Preview pause handling
//! - Thread-safe access; clones share the same session

use super::frame_loop::{CaptureLoopController, LoopSignals};
use super::types::*;
use super::CameraController;
use crate::backends::virtual_camera;
use crate::config::Config;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Internal manager state
struct ManagerState {
    devices: Vec<CameraDevice>,
    current: usize,
    format: CameraFormat,
    capture_loop: Option<CaptureLoopController>,
}

/// Camera session manager
///
/// `state` is only held for short reads and writes. Start, stop and switch
/// serialize on `lifecycle`, which covers thread joins and source opens.
#[derive(Clone)]
pub struct CameraManager {
    state: Arc<Mutex<ManagerState>>,
    lifecycle: Arc<Mutex<()>>,
    frames: Arc<FrameSender>,
    signals: LoopSignals,
}

impl CameraManager {
    /// Create a manager over a fixed device list
    pub fn new(devices: Vec<CameraDevice>, format: CameraFormat) -> Self {
        info!(count = devices.len(), format = %format, "Creating camera manager");

        let (sender, _) = tokio::sync::watch::channel(None);

        Self {
            state: Arc::new(Mutex::new(ManagerState {
                devices,
                current: 0,
                format,
                capture_loop: None,
            })),
            lifecycle: Arc::new(Mutex::new(())),
            frames: Arc::new(sender),
            signals: LoopSignals {
                paused: Arc::new(AtomicBool::new(false)),
                sequence: Arc::new(AtomicU64::new(0)),
            },
        }
    }

    /// Create a manager over the virtual devices named in `config`
    ///
    /// Selects the last used camera when it is still available.
    pub fn from_config(config: &Config) -> Self {
        let manager = Self::new(
            virtual_camera::enumerate_devices(&config.virtual_sources),
            CameraFormat::default(),
        );
        if let Some(path) = &config.last_camera_path {
            manager.select_device(path);
        }
        manager
    }

    /// Select a device by path before the session starts
    ///
    /// Returns false if no device has that path.
    pub fn select_device(&self, path: &str) -> bool {
        let mut state = self.state.lock().unwrap();
        match state.devices.iter().position(|d| d.path == path) {
            Some(index) => {
                debug!(path, index, "Selected camera");
                state.current = index;
                true
            }
            None => false,
        }
    }

    /// Whether a capture loop is active
    pub fn is_running(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .capture_loop
            .as_ref()
            .is_some_and(CaptureLoopController::is_running)
    }

    fn start_session(&self) -> BackendResult<()> {
        let _lifecycle = self.lifecycle.lock().unwrap();
        let (device, format) = {
            let state = self.state.lock().unwrap();
            if state.capture_loop.is_some() {
                debug!("Session already running");
                return Ok(());
            }
            let device = state
                .devices
                .get(state.current)
                .cloned()
                .ok_or_else(|| BackendError::DeviceNotFound("No cameras found".to_string()))?;
            (device, state.format)
        };

        info!(device = %device.name, format = %format, "Starting camera session");
        let capture_loop = self.open_loop(&device, format)?;
        self.state.lock().unwrap().capture_loop = Some(capture_loop);
        Ok(())
    }

    fn stop_session(&self) {
        let _lifecycle = self.lifecycle.lock().unwrap();
        // Join the thread outside the state lock
        let capture_loop = self.state.lock().unwrap().capture_loop.take();
        if let Some(capture_loop) = capture_loop {
            info!(name = capture_loop.name(), "Stopping camera session");
            capture_loop.stop();
        }
        self.frames.send_replace(None);
    }

    fn switch_device(&self) -> BackendResult<()> {
        let _lifecycle = self.lifecycle.lock().unwrap();
        let (previous, next, index, format, old_loop) = {
            let mut state = self.state.lock().unwrap();
            let count = state.devices.len();
            if count <= 1 {
                debug!(count, "Only one camera, switch ignored");
                return Ok(());
            }

            let index = (state.current + 1) % count;
            let Some(old_loop) = state.capture_loop.take() else {
                // Not running, the choice applies on the next start
                state.current = index;
                info!(device = %state.devices[index].name, "Selected camera for next start");
                return Ok(());
            };
            (
                state.devices[state.current].clone(),
                state.devices[index].clone(),
                index,
                state.format,
                old_loop,
            )
        };

        // The current device only changes once the new source is running
        old_loop.stop();
        self.frames.send_replace(None);

        info!(device = %next.name, "Switching camera");
        match self.open_loop(&next, format) {
            Ok(capture_loop) => {
                let mut state = self.state.lock().unwrap();
                state.current = index;
                state.capture_loop = Some(capture_loop);
                Ok(())
            }
            Err(e) => {
                warn!(device = %next.name, error = %e, "Failed to switch camera, restoring previous");
                let restored = self.open_loop(&previous, format)?;
                self.state.lock().unwrap().capture_loop = Some(restored);
                Err(e)
            }
        }
    }

    fn latest_frame(&self) -> BackendResult<Arc<CameraFrame>> {
        if !self.is_running() {
            return Err(BackendError::NotStarted);
        }
        self.frames
            .borrow()
            .clone()
            .ok_or(BackendError::NoFrameAvailable)
    }

    fn open_loop(
        &self,
        device: &CameraDevice,
        format: CameraFormat,
    ) -> BackendResult<CaptureLoopController> {
        let source = virtual_camera::open_source(device, format)?;
        Ok(CaptureLoopController::start(
            &device.name,
            source,
            Arc::clone(&self.frames),
            self.signals.clone(),
        ))
    }

    /// Run a blocking manager operation on the blocking pool
    fn blocking<T, F>(&self, op: F) -> BoxFuture<'static, BackendResult<T>>
    where
        T: Send + 'static,
        F: FnOnce(CameraManager) -> BackendResult<T> + Send + 'static,
    {
        let manager = self.clone();
        async move {
            tokio::task::spawn_blocking(move || op(manager))
                .await
                .map_err(|e| BackendError::Other(format!("Camera task error: {}", e)))?
        }
        .boxed()
    }
}

impl CameraController for CameraManager {
    fn start(&self) -> BoxFuture<'_, BackendResult<()>> {
        self.blocking(|manager| manager.start_session())
    }

    fn stop(&self) -> BoxFuture<'_, BackendResult<()>> {
        self.blocking(|manager| {
            manager.stop_session();
            Ok(())
        })
    }

    fn take_photo(&self) -> BoxFuture<'_, BackendResult<Arc<CameraFrame>>> {
        let result = self.latest_frame();
        if let Ok(frame) = &result {
            info!(sequence = frame.sequence, "Captured photo frame");
        }
        futures::future::ready(result).boxed()
    }

    fn switch_capture_device(&self) -> BoxFuture<'_, BackendResult<()>> {
        self.blocking(|manager| manager.switch_device())
    }

    fn is_preview_paused(&self) -> bool {
        self.signals.paused.load(Ordering::SeqCst)
    }

    fn set_preview_paused(&self, paused: bool) {
        info!(paused, "Preview pause changed");
        self.signals.paused.store(paused, Ordering::SeqCst);
    }

    fn preview_frames(&self) -> FrameReceiver {
        self.frames.subscribe()
    }

    fn available_devices(&self) -> Vec<CameraDevice> {
        self.state.lock().unwrap().devices.clone()
    }

    fn current_device(&self) -> Option<CameraDevice> {
        let state = self.state.lock().unwrap();
        state.devices.get(state.current).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::timing;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn tiny() -> CameraFormat {
        CameraFormat {
            width: 8,
            height: 6,
            framerate: 120,
        }
    }

    async fn wait_for_frame(receiver: &mut FrameReceiver) -> Arc<CameraFrame> {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if let Some(frame) = receiver.borrow_and_update().clone() {
                    return frame;
                }
                receiver.changed().await.unwrap();
            }
        })
        .await
        .expect("no preview frame published")
    }

    #[tokio::test]
    async fn test_take_photo_before_start_fails() {
        let manager = CameraManager::new(virtual_camera::enumerate_devices(&[]), tiny());
        assert_eq!(manager.take_photo().await.unwrap_err(), BackendError::NotStarted);
    }

    #[tokio::test]
    async fn test_start_publishes_and_captures() {
        let manager = CameraManager::new(virtual_camera::enumerate_devices(&[]), tiny());
        let mut frames = manager.preview_frames();

        manager.start().await.unwrap();
        manager.start().await.unwrap();
        wait_for_frame(&mut frames).await;

        let photo = manager.take_photo().await.unwrap();
        assert_eq!((photo.width, photo.height), (8, 6));

        manager.stop().await.unwrap();
        assert!(!manager.is_running());
        assert!(frames.borrow().is_none());
    }

    #[tokio::test]
    async fn test_no_devices_is_not_found() {
        let manager = CameraManager::new(Vec::new(), tiny());
        assert!(matches!(
            manager.start().await,
            Err(BackendError::DeviceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_switch_cycles_devices() {
        let manager = CameraManager::new(virtual_camera::enumerate_devices(&[]), tiny());
        manager.start().await.unwrap();
        assert_eq!(manager.current_device().unwrap().path, "virtual:back");

        manager.switch_capture_device().await.unwrap();
        assert_eq!(manager.current_device().unwrap().path, "virtual:front");
        assert!(manager.is_running());

        manager.switch_capture_device().await.unwrap();
        assert_eq!(manager.current_device().unwrap().path, "virtual:back");
        manager.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_switch_with_single_device_is_noop() {
        let mut devices = virtual_camera::enumerate_devices(&[]);
        devices.truncate(1);
        let manager = CameraManager::new(devices, tiny());
        manager.start().await.unwrap();

        manager.switch_capture_device().await.unwrap();
        assert_eq!(manager.current_device().unwrap().path, "virtual:back");
        assert!(manager.is_running());
        manager.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_switch_restores_previous_device() {
        let mut devices = virtual_camera::enumerate_devices(&[PathBuf::from("/nonexistent/a.png")]);
        devices.remove(1);
        let manager = CameraManager::new(devices, tiny());
        manager.start().await.unwrap();

        assert!(manager.switch_capture_device().await.is_err());
        assert_eq!(manager.current_device().unwrap().path, "virtual:back");
        assert!(manager.is_running());
        manager.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_pause_stops_running_session() {
        let manager = CameraManager::new(virtual_camera::enumerate_devices(&[]), tiny());
        let mut frames = manager.preview_frames();
        manager.start().await.unwrap();
        wait_for_frame(&mut frames).await;

        manager.set_preview_paused(true);
        // Let a pull already in progress land
        tokio::time::sleep(timing::PAUSE_CHECK_INTERVAL).await;
        frames.borrow_and_update();
        let sequence = manager.signals.sequence.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(!frames.has_changed().unwrap());
        assert_eq!(manager.signals.sequence.load(Ordering::SeqCst), sequence);

        manager.set_preview_paused(false);
        tokio::time::timeout(Duration::from_secs(2), frames.changed())
            .await
            .expect("preview did not resume")
            .unwrap();
        assert!(frames.borrow().as_ref().unwrap().sequence >= sequence);
        manager.stop().await.unwrap();
    }

    /// Opening a FIFO blocks until a writer shows up, which holds the switch
    /// in the middle of opening the next source
    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_current_device_answers_during_slow_switch() {
        let dir = std::env::temp_dir().join(format!("snapcam-switch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let fifo = dir.join("slow.png");
        std::fs::remove_file(&fifo).ok();
        let made = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(made.success());

        let mut devices = virtual_camera::enumerate_devices(&[fifo.clone()]);
        devices.remove(1);
        let manager = CameraManager::new(devices, tiny());
        manager.start().await.unwrap();

        let switching = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.switch_capture_device().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!switching.is_finished());

        let asked = Instant::now();
        assert_eq!(manager.current_device().unwrap().path, "virtual:back");
        assert!(asked.elapsed() < Duration::from_millis(100));

        let writer = fifo.clone();
        tokio::task::spawn_blocking(move || std::fs::write(writer, b"not an image"))
            .await
            .unwrap()
            .unwrap();
        assert!(switching.await.unwrap().is_err());
        assert_eq!(manager.current_device().unwrap().path, "virtual:back");
        assert!(manager.is_running());

        manager.stop().await.unwrap();
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_select_device_by_path() {
        let manager = CameraManager::new(virtual_camera::enumerate_devices(&[]), tiny());
        assert!(manager.select_device("virtual:front"));
        assert!(!manager.select_device("virtual:missing"));
        assert_eq!(manager.current_device().unwrap().position, CameraPosition::Front);
    }
}
