// SPDX-License-Identifier: GPL-3.0-only
//! Thread lifecycle management for the preview capture loop
//!
//! One thread per open device pulls frames from its [`FrameSource`] and
//! publishes them on the preview channel. While the pause signal is set the
//! source is not touched at all.

use super::types::FrameSender;
use crate::backends::virtual_camera::FrameSource;
use crate::constants::timing;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Shared signals read by the capture thread
#[derive(Clone)]
pub struct LoopSignals {
    /// Preview paused, the loop idles without pulling frames
    pub paused: Arc<AtomicBool>,
    /// Sequence counter shared across device switches
    pub sequence: Arc<AtomicU64>,
}

/// Controller for a capture loop running in a separate thread
pub struct CaptureLoopController {
    thread_handle: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    name: String,
}

impl CaptureLoopController {
    /// Start pulling frames from `source` into `sender`
    pub fn start(
        name: &str,
        mut source: Box<dyn FrameSource>,
        sender: Arc<FrameSender>,
        signals: LoopSignals,
    ) -> Self {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop_signal_clone = Arc::clone(&stop_signal);
        let name_clone = name.to_string();

        let interval = frame_interval(source.format().framerate);
        info!(name = %name, ?interval, "Starting capture loop");

        let thread_handle = thread::spawn(move || {
            debug!(name = %name_clone, "Capture loop thread started");

            loop {
                if stop_signal_clone.load(Ordering::SeqCst) {
                    debug!(name = %name_clone, "Stop signal received");
                    break;
                }

                if signals.paused.load(Ordering::SeqCst) {
                    thread::sleep(timing::PAUSE_CHECK_INTERVAL);
                    continue;
                }

                let started = Instant::now();
                let sequence = signals.sequence.fetch_add(1, Ordering::SeqCst);
                match source.next_frame(sequence) {
                    Ok(frame) => {
                        sender.send_replace(Some(Arc::new(frame)));
                    }
                    Err(e) => {
                        // Keep trying, the next interval may succeed
                        warn!(name = %name_clone, error = %e, "Frame capture failed");
                    }
                }

                if let Some(remaining) = interval.checked_sub(started.elapsed()) {
                    thread::sleep(remaining);
                }
            }

            info!(name = %name_clone, "Capture loop thread exiting");
        });

        Self {
            thread_handle: Some(thread_handle),
            stop_signal,
            name: name.to_string(),
        }
    }

    /// Signal the loop to stop and wait for the thread to exit
    pub fn stop(mut self) {
        self.stop_internal();
    }

    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn stop_internal(&mut self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            if handle.join().is_err() {
                warn!(name = %self.name, "Capture loop thread panicked");
            }
        }
    }
}

impl Drop for CaptureLoopController {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            self.stop_internal();
        }
    }
}

fn frame_interval(framerate: u32) -> Duration {
    if framerate == 0 {
        timing::FRAME_INTERVAL
    } else {
        Duration::from_secs(1) / framerate
    }
}
