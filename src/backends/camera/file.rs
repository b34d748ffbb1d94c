// SPDX-License-Identifier: GPL-3.0-only

//! File-backed still camera
//!
//! "Captures" by copying a configured source image to the requested
//! output path. This is the device the CLI uses on machines without
//! camera hardware, and a deterministic stand-in for tests.

use super::{FlashMode, StillCamera};
use crate::errors::CaptureError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileCamera {
    source: PathBuf,
    opened: bool,
}

impl FileCamera {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            opened: false,
        }
    }
}

#[async_trait]
impl StillCamera for FileCamera {
    async fn open(&mut self) -> Result<(), CaptureError> {
        if !self.source.is_file() {
            return Err(CaptureError::DeviceError(format!(
                "source image not found: {}",
                self.source.display()
            )));
        }
        self.opened = true;
        Ok(())
    }

    async fn set_flash(&mut self, mode: FlashMode) -> Result<(), CaptureError> {
        debug!(?mode, "Flash mode ignored by file camera");
        Ok(())
    }

    async fn capture_still(&mut self, output: &Path) -> Result<(), CaptureError> {
        if !self.opened {
            return Err(CaptureError::NotReady);
        }
        tokio::fs::copy(&self.source, output)
            .await
            .map_err(|e| CaptureError::DeviceError(e.to_string()))?;
        debug!(output = %output.display(), "File camera wrote still");
        Ok(())
    }

    fn close(&mut self) {
        self.opened = false;
    }
}
