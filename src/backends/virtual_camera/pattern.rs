// SPDX-License-Identifier: GPL-3.0-only

//! Generated test patterns

use super::FrameSource;
use crate::backends::camera::types::{BackendError, BackendResult, CameraFormat, CameraFrame};

/// Animated test pattern
///
/// Pattern 0 is a diagonal gradient drifting to the right, pattern 1 is
/// vertical colour bars with a moving bright scanline. Anything else falls
/// back to pattern 0.
pub struct TestPatternSource {
    pattern: u8,
    format: CameraFormat,
    tick: u32,
}

/// Classic 75% colour bars
const BARS: [(u8, u8, u8); 7] = [
    (191, 191, 191),
    (191, 191, 0),
    (0, 191, 191),
    (0, 191, 0),
    (191, 0, 191),
    (191, 0, 0),
    (0, 0, 191),
];

impl TestPatternSource {
    pub fn new(pattern: u8, format: CameraFormat) -> Self {
        Self {
            pattern,
            format,
            tick: 0,
        }
    }

    fn gradient(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let w = self.format.width.max(1);
        let h = self.format.height.max(1);
        let shifted = (x + self.tick * 4) % w;
        let r = (shifted * 255 / w) as u8;
        let g = (y * 255 / h) as u8;
        let b = 255 - r / 2;
        (r, g, b)
    }

    fn bars(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let bar = (x as usize * BARS.len()) / self.format.width.max(1) as usize;
        let scanline = (self.tick * 3) % self.format.height.max(1);
        if y.abs_diff(scanline) < 2 {
            (255, 255, 255)
        } else {
            BARS[bar.min(BARS.len() - 1)]
        }
    }
}

impl FrameSource for TestPatternSource {
    fn next_frame(&mut self, sequence: u64) -> BackendResult<CameraFrame> {
        let CameraFormat { width, height, .. } = self.format;
        let mut data = Vec::with_capacity((width * height * 4) as usize);

        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = match self.pattern {
                    1 => self.bars(x, y),
                    _ => self.gradient(x, y),
                };
                data.extend_from_slice(&[r, g, b, 255]);
            }
        }

        self.tick = self.tick.wrapping_add(1);

        CameraFrame::from_rgba(width, height, data, sequence)
            .ok_or_else(|| BackendError::Other(format!("Invalid pattern format {}", self.format)))
    }

    fn format(&self) -> CameraFormat {
        self.format
    }
}
