// SPDX-License-Identifier: GPL-3.0-only

//! Directory backed photo collection

use super::{PhotoAsset, PhotoCollectionStore, Thumbnail};
use crate::backends::camera::types::CameraFrame;
use crate::errors::{PhotoError, PhotoResult};
use crate::pipelines::photo::PhotoPipeline;
use crate::storage;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Photos stored as image files in a single directory
pub struct PhotoCollection {
    directory: PathBuf,
    pipeline: PhotoPipeline,
    photos: Mutex<Vec<PhotoAsset>>,
}

impl PhotoCollection {
    pub fn new(directory: PathBuf, pipeline: PhotoPipeline) -> Self {
        Self {
            directory,
            pipeline,
            photos: Mutex::new(Vec::new()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    async fn scan(&self) -> PhotoResult<Vec<PhotoAsset>> {
        let dir = self.directory.clone();
        tokio::task::spawn_blocking(move || storage::scan_photos(&dir))
            .await
            .map_err(|e| PhotoError::LoadFailed(format!("Scan task error: {}", e)))
    }

    async fn load_all_inner(&self) -> PhotoResult<()> {
        let photos = self.scan().await?;
        info!(
            count = photos.len(),
            path = %self.directory.display(),
            "Photo collection loaded"
        );
        *self.photos.lock().unwrap() = photos;
        Ok(())
    }

    // Scans on its own so it can run concurrently with `load_all`
    async fn load_thumbnail_inner(&self) -> PhotoResult<Option<Thumbnail>> {
        let photos = self.scan().await?;
        let Some(latest) = photos.first() else {
            debug!("No photos yet, no thumbnail");
            return Ok(None);
        };
        storage::load_thumbnail(latest.path.clone()).await.map(Some)
    }

    async fn add_photo_inner(&self, frame: Arc<CameraFrame>) -> PhotoResult<PhotoAsset> {
        let path = self
            .pipeline
            .capture_and_save(frame, &self.directory)
            .await?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| PhotoError::LoadFailed(e.to_string()))?;
        let asset = PhotoAsset {
            modified: metadata
                .modified()
                .map(Into::into)
                .unwrap_or_else(|_| chrono::Local::now()),
            size_bytes: metadata.len(),
            path,
        };

        self.photos.lock().unwrap().insert(0, asset.clone());
        Ok(asset)
    }
}

impl PhotoCollectionStore for PhotoCollection {
    fn load_all(&self) -> BoxFuture<'_, PhotoResult<()>> {
        self.load_all_inner().boxed()
    }

    fn load_thumbnail(&self) -> BoxFuture<'_, PhotoResult<Option<Thumbnail>>> {
        self.load_thumbnail_inner().boxed()
    }

    fn add_photo(&self, frame: Arc<CameraFrame>) -> BoxFuture<'_, PhotoResult<PhotoAsset>> {
        self.add_photo_inner(frame).boxed()
    }

    fn photos(&self) -> Vec<PhotoAsset> {
        self.photos.lock().unwrap().clone()
    }
}
