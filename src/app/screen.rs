// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen
//!
//! Owns the view model and the navigation state. Rendering is a pure function
//! of [`ViewState`]; every collaborator call goes through the view model.

use crate::app::gallery::GalleryState;
use crate::app::state::{NavEvent, Screen, ViewState, transition};
use crate::app::ui::{Action, CameraView, ChromeBar};
use crate::app::view_model::ViewModel;
use tracing::{debug, info};

pub struct CameraScreen {
    model: ViewModel,
    screen: Screen,
    gallery: GalleryState,
}

impl CameraScreen {
    pub fn new(model: ViewModel) -> Self {
        Self {
            model,
            screen: Screen::default(),
            gallery: GalleryState::default(),
        }
    }

    /// Build the camera view for a state snapshot
    pub fn render(state: &ViewState) -> CameraView {
        CameraView {
            top_bar: ChromeBar::default(),
            viewfinder: state.build_viewfinder(),
            bottom_bar: state.build_bottom_bar(),
        }
    }

    /// Render the current view model state
    pub fn view(&self) -> CameraView {
        Self::render(&self.model.snapshot())
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut GalleryState {
        &mut self.gallery
    }

    pub fn on_appear(&self) {
        debug!("Camera screen appeared");
        self.model.on_appear();
    }

    pub fn on_shutter_pressed(&self) {
        self.model.take_photo();
    }

    pub fn on_switch_camera_pressed(&self) {
        self.model.switch_camera();
    }

    pub fn on_enter_gallery(&mut self) {
        if self.navigate(NavEvent::EnterGallery) {
            self.gallery.reset();
            self.model.refresh_photos();
        }
    }

    pub fn on_exit_gallery(&mut self) {
        self.navigate(NavEvent::ExitGallery);
    }

    /// Dispatch a control action
    ///
    /// Disabled controls do nothing.
    pub fn handle(&mut self, action: Action) {
        if !self.view().control(action).enabled {
            debug!(?action, "Ignoring disabled control");
            return;
        }
        match action {
            Action::OpenGallery => self.on_enter_gallery(),
            Action::TakePhoto => self.on_shutter_pressed(),
            Action::SwitchCamera => self.on_switch_camera_pressed(),
        }
    }

    /// Apply a navigation event, returns whether the screen changed
    ///
    /// The paused flag is written only when its derived value changes.
    fn navigate(&mut self, event: NavEvent) -> bool {
        let next = transition(self.screen, event);
        if next == self.screen {
            return false;
        }
        info!(from = ?self.screen, to = ?next, "Navigating");
        let paused = next.preview_paused();
        if paused != self.screen.preview_paused() {
            self.model.set_preview_paused(paused);
        }
        self.screen = next;
        true
    }
}
