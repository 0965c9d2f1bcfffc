// SPDX-License-Identifier: MPL-2.0

//! Capture button

use crate::app::state::ViewState;
use crate::app::ui::{Action, Control, Icon};
use crate::constants::ui;

impl ViewState {
    /// Build the capture button
    ///
    /// A white disc inside a white ring. Disabled when the camera could not
    /// be started; while starting it stays pressable and the controller
    /// reports whether a frame was available.
    pub fn build_capture_button(&self) -> Control {
        Control {
            action: Action::TakePhoto,
            label: ui::SHUTTER_LABEL,
            icon: Icon::ShutterRing {
                outer: ui::SHUTTER_OUTER,
                inner: ui::SHUTTER_INNER,
                ring_width: ui::SHUTTER_RING_WIDTH,
            },
            enabled: !self.camera_status.is_unavailable(),
        }
    }
}
