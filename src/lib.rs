// SPDX-License-Identifier: MPL-2.0

//! Snapcam - A minimal camera capture application
//!
//! A viewfinder with a shutter, a front/back camera switch and a link to the
//! photo gallery.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Camera screen, view model and navigation
//! - [`backends`]: Camera controller abstraction and virtual devices
//! - [`photo_library`]: Photo collection abstraction and directory store
//! - [`pipelines`]: Photo encoding
//! - [`config`]: User configuration handling
//! - [`storage`]: File storage and thumbnail management
//! - [`terminal`]: Terminal front end
//!
//! # Example
//!
//! ```ignore
//! use snapcam::{CameraManager, CameraScreen, Config, PhotoCollection, ViewModel};
//! use snapcam::pipelines::photo::PhotoPipeline;
//! use std::sync::Arc;
//!
//! let config = Config::load();
//! let camera = Arc::new(CameraManager::from_config(&config));
//! let photos = Arc::new(PhotoCollection::new(
//!     config.photo_directory(),
//!     PhotoPipeline::from_config(&config),
//! ));
//! let screen = CameraScreen::new(ViewModel::new(camera, photos));
//! screen.on_appear();
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod photo_library;
pub mod pipelines;
pub mod storage;
pub mod terminal;

// Re-export commonly used types
pub use app::{CameraScreen, CameraView, ViewModel, ViewState};
pub use backends::camera::{CameraController, CameraManager};
pub use config::Config;
pub use constants::QualityPreset;
pub use errors::{AppError, AppResult};
pub use photo_library::{PhotoCollection, PhotoCollectionStore};
