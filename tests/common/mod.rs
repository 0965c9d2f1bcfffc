// SPDX-License-Identifier: MPL-2.0

//! Recording test doubles for the camera controller and photo store

#![allow(dead_code)]

use futures::FutureExt;
use futures::future::BoxFuture;
use snapcam::backends::camera::{
    BackendError, BackendResult, CameraController, CameraDevice, CameraFrame, CameraPosition,
    DeviceSource, FrameReceiver, FrameSender,
};
use snapcam::errors::{PhotoError, PhotoResult};
use snapcam::photo_library::{PhotoAsset, PhotoCollectionStore, Thumbnail};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Collaborator calls in the order they were issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Start,
    Stop,
    TakePhoto,
    SwitchDevice,
    SetPaused(bool),
    LoadAll,
    LoadThumbnail,
    AddPhoto,
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    pub fn position(&self, call: Call) -> Option<usize> {
        self.calls().iter().position(|c| *c == call)
    }
}

pub fn device(name: &str, position: CameraPosition) -> CameraDevice {
    CameraDevice {
        name: name.to_string(),
        path: format!("fake:{}", name.to_lowercase()),
        position,
        source: DeviceSource::TestPattern(0),
    }
}

pub fn solid_frame(sequence: u64) -> CameraFrame {
    CameraFrame::from_rgba(4, 4, [10u8, 20, 30, 255].repeat(16), sequence).unwrap()
}

pub struct FakeCamera {
    log: CallLog,
    devices: Vec<CameraDevice>,
    current: AtomicUsize,
    paused: AtomicBool,
    start_error: Option<BackendError>,
    start_gate: Mutex<Option<oneshot::Receiver<()>>>,
    frames: FrameSender,
}

impl FakeCamera {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            devices: vec![
                device("Back", CameraPosition::Back),
                device("Front", CameraPosition::Front),
            ],
            current: AtomicUsize::new(0),
            paused: AtomicBool::new(false),
            start_error: None,
            start_gate: Mutex::new(None),
            frames: tokio::sync::watch::channel(None).0,
        }
    }

    pub fn with_devices(mut self, devices: Vec<CameraDevice>) -> Self {
        self.devices = devices;
        self
    }

    pub fn failing_start(mut self, error: BackendError) -> Self {
        self.start_error = Some(error);
        self
    }

    /// Hold `start` until the returned sender fires
    pub fn gated_start(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        *self.start_gate.lock().unwrap() = Some(rx);
        (self, tx)
    }

    /// Publish a preview frame
    pub fn publish(&self, frame: CameraFrame) -> Arc<CameraFrame> {
        let frame = Arc::new(frame);
        self.frames.send_replace(Some(Arc::clone(&frame)));
        frame
    }
}

impl CameraController for FakeCamera {
    fn start(&self) -> BoxFuture<'_, BackendResult<()>> {
        self.log.push(Call::Start);
        let gate = self.start_gate.lock().unwrap().take();
        async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            match &self.start_error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
        .boxed()
    }

    fn stop(&self) -> BoxFuture<'_, BackendResult<()>> {
        self.log.push(Call::Stop);
        futures::future::ready(Ok(())).boxed()
    }

    fn take_photo(&self) -> BoxFuture<'_, BackendResult<Arc<CameraFrame>>> {
        self.log.push(Call::TakePhoto);
        futures::future::ready(Ok(Arc::new(solid_frame(1)))).boxed()
    }

    fn switch_capture_device(&self) -> BoxFuture<'_, BackendResult<()>> {
        self.log.push(Call::SwitchDevice);
        let count = self.devices.len();
        if count > 1 {
            let next = (self.current.load(Ordering::SeqCst) + 1) % count;
            self.current.store(next, Ordering::SeqCst);
        }
        futures::future::ready(Ok(())).boxed()
    }

    fn is_preview_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    fn set_preview_paused(&self, paused: bool) {
        self.log.push(Call::SetPaused(paused));
        self.paused.store(paused, Ordering::SeqCst);
    }

    fn preview_frames(&self) -> FrameReceiver {
        self.frames.subscribe()
    }

    fn available_devices(&self) -> Vec<CameraDevice> {
        self.devices.clone()
    }

    fn current_device(&self) -> Option<CameraDevice> {
        self.devices.get(self.current.load(Ordering::SeqCst)).cloned()
    }
}

pub fn thumbnail(path: &str) -> Thumbnail {
    Thumbnail {
        path: PathBuf::from(path),
        width: 2,
        height: 2,
        rgba: Arc::new(vec![255; 16]),
    }
}

pub struct FakeStore {
    log: CallLog,
    photos: Mutex<Vec<PhotoAsset>>,
    thumbnail: Mutex<Option<Thumbnail>>,
    fail_add: bool,
}

impl FakeStore {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            photos: Mutex::new(Vec::new()),
            thumbnail: Mutex::new(None),
            fail_add: false,
        }
    }

    /// Start with one stored photo
    pub fn with_photo(self, path: &str) -> Self {
        *self.thumbnail.lock().unwrap() = Some(thumbnail(path));
        self.photos.lock().unwrap().push(PhotoAsset {
            path: PathBuf::from(path),
            modified: chrono::Local::now(),
            size_bytes: 16,
        });
        self
    }

    pub fn failing_add(mut self) -> Self {
        self.fail_add = true;
        self
    }
}

impl PhotoCollectionStore for FakeStore {
    fn load_all(&self) -> BoxFuture<'_, PhotoResult<()>> {
        self.log.push(Call::LoadAll);
        futures::future::ready(Ok(())).boxed()
    }

    fn load_thumbnail(&self) -> BoxFuture<'_, PhotoResult<Option<Thumbnail>>> {
        self.log.push(Call::LoadThumbnail);
        let thumbnail = self.thumbnail.lock().unwrap().clone();
        futures::future::ready(Ok(thumbnail)).boxed()
    }

    fn add_photo(&self, frame: Arc<CameraFrame>) -> BoxFuture<'_, PhotoResult<PhotoAsset>> {
        self.log.push(Call::AddPhoto);
        if self.fail_add {
            return futures::future::ready(Err(PhotoError::SaveFailed("disk full".into()))).boxed();
        }

        let mut photos = self.photos.lock().unwrap();
        let path = format!("/fake/IMG_{}.jpg", photos.len() + frame.sequence as usize);
        let asset = PhotoAsset {
            path: PathBuf::from(&path),
            modified: chrono::Local::now(),
            size_bytes: frame.data.len() as u64,
        };
        photos.insert(0, asset.clone());
        *self.thumbnail.lock().unwrap() = Some(thumbnail(&path));
        futures::future::ready(Ok(asset)).boxed()
    }

    fn photos(&self) -> Vec<PhotoAsset> {
        self.photos.lock().unwrap().clone()
    }
}
