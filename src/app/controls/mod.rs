// SPDX-License-Identifier: MPL-2.0

//! Capture controls module

pub mod capture_button;
