// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Listing available cameras
//! - Taking photos
//! - Listing stored photos

use snapcam::backends::camera::{CameraController, CameraManager, FrameReceiver};
use snapcam::photo_library::{PhotoCollection, PhotoCollectionStore};
use snapcam::pipelines::photo::PhotoPipeline;
use snapcam::Config;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// How long to wait for the first preview frame
const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// List all available cameras
pub fn list_cameras(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let manager = CameraManager::from_config(config);
    let cameras = manager.available_devices();

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    let current = manager.current_device().map(|device| device.path);

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        let marker = if current.as_deref() == Some(camera.path.as_str()) {
            " (last used)"
        } else {
            ""
        };
        println!("  [{}] {}{}", index, camera.name, marker);
        println!("      Position: {} | Path: {}", camera.position, camera.path);
    }

    Ok(())
}

/// Take a photo using the specified camera
pub fn take_photo(
    config: &Config,
    camera_index: usize,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let manager = CameraManager::from_config(config);
    let cameras = manager.available_devices();
    if cameras.is_empty() {
        return Err("No cameras found".into());
    }

    let camera = cameras.get(camera_index).ok_or_else(|| {
        format!(
            "Camera index {} out of range (0-{})",
            camera_index,
            cameras.len() - 1
        )
    })?;
    manager.select_device(&camera.path);
    println!("Using camera: {}", camera.name);

    // Write into the requested directory, or next to the requested file
    let output_dir = match output.as_ref() {
        Some(path) if path.is_dir() => path.clone(),
        Some(path) => path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(|parent| parent.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
        None => config.photo_directory(),
    };

    let photos = PhotoCollection::new(output_dir, PhotoPipeline::from_config(config));

    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(async {
        let mut frames = manager.preview_frames();
        manager.start().await?;

        println!("Capturing...");
        let captured = wait_for_frame(&mut frames).await;
        let result = match captured {
            Ok(()) => manager.take_photo().await.map_err(Into::into),
            Err(e) => Err(e),
        };
        manager.stop().await?;

        let frame = result?;
        photos
            .add_photo(frame)
            .await
            .map_err(Box::<dyn std::error::Error>::from)
    })?;

    // If user specified a specific filename, rename the file
    if let Some(user_path) = output
        && !user_path.is_dir()
    {
        std::fs::rename(&saved.path, &user_path)?;
        println!("Photo saved: {}", user_path.display());
        return Ok(());
    }

    println!("Photo saved: {}", saved.path.display());
    Ok(())
}

/// List stored photos, newest first
pub fn list_gallery(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let dir = config.photo_directory();
    let photos = PhotoCollection::new(dir.clone(), PhotoPipeline::from_config(config));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(photos.load_all())?;
    let assets = photos.photos();

    if assets.is_empty() {
        println!("No photos in {}", dir.display());
        return Ok(());
    }

    println!("Photos in {}:", dir.display());
    println!();
    for asset in &assets {
        println!(
            "  {}  {}  {} bytes",
            asset.modified.format("%Y-%m-%d %H:%M:%S"),
            asset.file_name(),
            asset.size_bytes
        );
    }

    Ok(())
}

async fn wait_for_frame(frames: &mut FrameReceiver) -> Result<(), Box<dyn std::error::Error>> {
    tokio::time::timeout(FRAME_TIMEOUT, frames.wait_for(|frame| frame.is_some()))
        .await
        .map_err(|_| "Timed out waiting for a camera frame")?
        .map_err(|_| "Camera stopped before producing a frame")?;
    Ok(())
}
