// SPDX-License-Identifier: GPL-3.0-only

//! Photo review actions
//!
//! Dispatches the three actions available over a finished, tagged
//! photo: retake (discard), confirm (persist to the gallery), and
//! share (hand off to the OS share surface).

use crate::app::state::ReviewState;
use crate::backends::camera::CapturedPhoto;
use crate::backends::gallery::MediaGallery;
use crate::backends::share::ShareSurface;
use crate::errors::GalleryError;
use std::path::PathBuf;
use tracing::{info, warn};

pub struct PhotoReviewFlow {
    gallery: Box<dyn MediaGallery>,
    share: Box<dyn ShareSurface>,
}

impl PhotoReviewFlow {
    pub fn new(gallery: Box<dyn MediaGallery>, share: Box<dyn ShareSurface>) -> Self {
        Self { gallery, share }
    }

    /// Discard the previewed photo and return to the live feed
    ///
    /// The tagged file is always deleted; a deletion failure is
    /// logged but still leaves the flow in Live.
    pub async fn retake(&self, review: &mut ReviewState) {
        let Some(photo) = review.take_photo() else {
            return;
        };
        info!(path = %photo.file_path.display(), "Retake: discarding tagged photo");
        if let Err(e) = tokio::fs::remove_file(&photo.file_path).await {
            warn!(error = %e, "Failed to delete discarded photo");
        }
    }

    /// Persist the photo's copy to the permanent media store
    ///
    /// The working file remains; ownership of the copy transfers to
    /// the gallery. On failure the review state is untouched and the
    /// action may be retried.
    pub async fn confirm(&self, photo: &CapturedPhoto) -> Result<PathBuf, GalleryError> {
        self.gallery.persist(&photo.file_path).await
    }

    /// Hand the photo to the OS share surface, fire-and-forget
    pub fn share(&self, photo: &CapturedPhoto) {
        self.share.present(&photo.file_path);
    }
}
