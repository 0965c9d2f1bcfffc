// SPDX-License-Identifier: GPL-3.0-only

//! Camera switcher button

use crate::app::state::ViewState;
use crate::app::ui::{Action, Control, Icon};
use crate::constants::ui;

impl ViewState {
    /// Build the camera switcher button
    ///
    /// Always shown; whether a switch does anything with a single device is
    /// up to the camera controller. Disabled when the camera is unavailable.
    pub fn build_camera_switcher(&self) -> Control {
        Control {
            action: Action::SwitchCamera,
            label: ui::SWITCH_LABEL,
            icon: Icon::Symbol {
                name: ui::SWITCH_ICON,
                size: ui::SWITCH_ICON_SIZE,
            },
            enabled: !self.camera_status.is_unavailable(),
        }
    }
}
