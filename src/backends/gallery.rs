// SPDX-License-Identifier: GPL-3.0-only

//! Media gallery boundary
//!
//! Confirmed photos are handed to the device's permanent media store.
//! On the desktop that store is a directory; ownership of the copy
//! transfers to the gallery while the working file stays behind.

use crate::errors::GalleryError;
use crate::storage;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

#[async_trait]
pub trait MediaGallery: Send + Sync {
    /// Persist a copy of `path` into the permanent media store.
    ///
    /// Returns the path of the stored copy. The source file is left
    /// untouched.
    async fn persist(&self, path: &Path) -> Result<PathBuf, GalleryError>;
}

/// Gallery backed by a plain directory
pub struct DirectoryGallery {
    root: PathBuf,
}

impl DirectoryGallery {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Gallery rooted at the default location (~/Pictures/geocam/gallery)
    pub fn default_location() -> Self {
        Self::new(storage::get_gallery_directory())
    }
}

#[async_trait]
impl MediaGallery for DirectoryGallery {
    async fn persist(&self, path: &Path) -> Result<PathBuf, GalleryError> {
        storage::ensure_directory(&self.root)
            .map_err(|e| GalleryError::SaveFailed(e.to_string()))?;

        let filename = path
            .file_name()
            .ok_or_else(|| GalleryError::SaveFailed(format!("no file name: {}", path.display())))?;
        let dest = self.root.join(filename);

        tokio::fs::copy(path, &dest)
            .await
            .map_err(|e| GalleryError::SaveFailed(e.to_string()))?;

        info!(path = %dest.display(), "Photo persisted to gallery");
        Ok(dest)
    }
}
