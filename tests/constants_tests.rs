// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use snapcam::constants::{QualityPreset, ui};

#[test]
fn test_quality_preset_values() {
    assert_eq!(QualityPreset::ALL.len(), 4);
}

#[test]
fn test_quality_preset_ordering() {
    // Presets are ordered from lowest to highest quality
    let mut prev = 0u8;
    for preset in QualityPreset::ALL {
        let quality = preset.jpeg_quality();
        assert!(quality > prev, "Presets should be ordered from lowest to highest");
        assert!(quality <= 100);
        prev = quality;
    }
}

#[test]
fn test_quality_preset_display_names() {
    for preset in QualityPreset::ALL {
        let name = preset.display_name();
        assert!(
            !name.is_empty(),
            "Preset {:?} has empty display name",
            preset
        );
    }
}

#[test]
fn test_shutter_disc_fits_inside_ring() {
    assert!(ui::SHUTTER_INNER + 2.0 * ui::SHUTTER_RING_WIDTH < ui::SHUTTER_OUTER);
}

#[test]
fn test_control_labels() {
    assert_eq!(ui::VIEWFINDER_LABEL, "View Finder");
    assert_eq!(ui::GALLERY_LABEL, "Gallery");
    assert_eq!(ui::SHUTTER_LABEL, "Take Photo");
    assert_eq!(ui::SWITCH_LABEL, "Switch Camera");
}
