// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera capture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                  │
//! └────────────────────┬────────────────────────┘
//!                      │ CameraController
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                  │
//! │  ┌──────────────────┐  ┌──────────────────┐ │
//! │  │      Camera      │  │  Virtual Camera  │ │
//! │  │ (session manager)│─▶│ (frame sources)  │ │
//! │  └──────────────────┘  └──────────────────┘ │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Controller trait, session manager and capture loop
//! - [`virtual_camera`]: Test pattern and still image frame sources

pub mod camera;
pub mod virtual_camera;
