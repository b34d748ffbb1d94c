// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend
//!
//! [`CameraSession`] owns a live device handle behind the
//! [`StillCamera`] trait and enforces the session lifecycle:
//! explicit open, at most one in-flight capture, and an idempotent
//! close that runs on every exit path.

pub mod file;

use crate::errors::CaptureError;
use crate::storage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Flash behavior for still captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlashMode {
    /// Let the device decide (default)
    #[default]
    Auto,
    On,
    Off,
}

/// Camera session lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraSessionState {
    /// No device handle held yet
    Uninitialized,
    /// Device open in progress
    Initializing,
    /// Device open, captures accepted
    Ready,
    /// Device open failed; terminal until a retry re-opens
    Failed(String),
}

/// Whether a capture is in flight for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// A raw still image produced by a capture
///
/// Exclusively owned by the watermark pipeline until tagging
/// completes, then by the review flow. Deleted on retake, persisted
/// on confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub file_path: PathBuf,
    pub created_at_millis: i64,
}

/// Still camera device boundary
///
/// The device is opaque to this crate: it either writes a still image
/// to the requested path or reports a capture error.
#[async_trait]
pub trait StillCamera: Send + Sync {
    /// Acquire the device handle
    async fn open(&mut self) -> Result<(), CaptureError>;

    /// Set the flash mode for subsequent captures
    async fn set_flash(&mut self, mode: FlashMode) -> Result<(), CaptureError>;

    /// Capture a still image to `output`
    async fn capture_still(&mut self, output: &Path) -> Result<(), CaptureError>;

    /// Release the device handle. Must be safe to call more than once.
    fn close(&mut self);
}

/// Camera session over a [`StillCamera`] device
pub struct CameraSession {
    camera: tokio::sync::Mutex<Box<dyn StillCamera>>,
    state: Mutex<CameraSessionState>,
    capturing: AtomicBool,
    closed: AtomicBool,
}

impl CameraSession {
    /// Create a session around an unopened device
    pub fn new(camera: Box<dyn StillCamera>) -> Self {
        Self {
            camera: tokio::sync::Mutex::new(camera),
            state: Mutex::new(CameraSessionState::Uninitialized),
            capturing: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }

    /// Current session lifecycle state
    pub fn state(&self) -> CameraSessionState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether a capture is currently in flight
    pub fn capture_state(&self) -> CaptureState {
        if self.capturing.load(Ordering::SeqCst) {
            CaptureState::Capturing
        } else {
            CaptureState::Idle
        }
    }

    fn set_state(&self, state: CameraSessionState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    /// Open the device and apply the flash mode
    ///
    /// Drives Uninitialized -> Initializing -> Ready, or Failed on
    /// error. Calling open again after a failure retries the device.
    pub async fn open(&self, flash: FlashMode) -> Result<(), CaptureError> {
        self.set_state(CameraSessionState::Initializing);
        info!("Opening camera device");

        let mut camera = self.camera.lock().await;
        if let Err(e) = camera.open().await {
            error!(error = %e, "Camera device open failed");
            self.set_state(CameraSessionState::Failed(e.to_string()));
            return Err(e);
        }
        if let Err(e) = camera.set_flash(flash).await {
            // Flash is a preference, not a requirement for Ready
            warn!(error = %e, "Failed to apply flash mode");
        }
        drop(camera);

        self.closed.store(false, Ordering::SeqCst);
        self.set_state(CameraSessionState::Ready);
        info!(?flash, "Camera session ready");
        Ok(())
    }

    /// Capture a single still image
    ///
    /// Returns [`CaptureError::AlreadyCapturing`] while a prior capture
    /// for this session has not resolved, and
    /// [`CaptureError::NotReady`] unless the session is Ready.
    pub async fn capture(&self) -> Result<CapturedPhoto, CaptureError> {
        if self.state() != CameraSessionState::Ready {
            return Err(CaptureError::NotReady);
        }

        // At most one in-flight capture per session
        if self
            .capturing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Capture requested while one is already in flight");
            return Err(CaptureError::AlreadyCapturing);
        }

        let (path, stamp) = storage::next_raw_capture_path();
        info!(path = %path.display(), "Capturing still image");

        let result = self.camera.lock().await.capture_still(&path).await;
        self.capturing.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => Ok(CapturedPhoto {
                file_path: path,
                created_at_millis: stamp,
            }),
            Err(e) => {
                error!(error = %e, "Still capture failed");
                Err(e)
            }
        }
    }

    /// Release the device handle
    ///
    /// Idempotent; the handle is released exactly once no matter how
    /// many exit paths reach this.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("Closing camera session");
        self.camera.lock().await.close();
        self.set_state(CameraSessionState::Uninitialized);
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        // Backstop for exit paths that skipped close()
        if !self.closed.swap(true, Ordering::SeqCst) {
            if let Ok(mut camera) = self.camera.try_lock() {
                camera.close();
            } else {
                warn!("Camera session dropped while device busy");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Device that sleeps during capture and counts open/close calls
    struct SlowCamera {
        capture_delay: Duration,
        closes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl StillCamera for SlowCamera {
        async fn open(&mut self) -> Result<(), CaptureError> {
            Ok(())
        }

        async fn set_flash(&mut self, _mode: FlashMode) -> Result<(), CaptureError> {
            Ok(())
        }

        async fn capture_still(&mut self, output: &Path) -> Result<(), CaptureError> {
            tokio::time::sleep(self.capture_delay).await;
            std::fs::write(output, b"raw").map_err(|e| CaptureError::DeviceError(e.to_string()))
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_capture_before_open_is_not_ready() {
        let session = CameraSession::new(Box::new(SlowCamera {
            capture_delay: Duration::ZERO,
            closes: Arc::new(AtomicUsize::new(0)),
        }));
        assert_eq!(session.capture().await, Err(CaptureError::NotReady));
    }

    #[tokio::test]
    async fn test_concurrent_captures_rejected() {
        let session = Arc::new(CameraSession::new(Box::new(SlowCamera {
            capture_delay: Duration::from_millis(100),
            closes: Arc::new(AtomicUsize::new(0)),
        })));
        session.open(FlashMode::Auto).await.unwrap();

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.capture().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        // All attempts while the first is in flight bounce
        assert_eq!(session.capture_state(), CaptureState::Capturing);
        assert_eq!(session.capture().await, Err(CaptureError::AlreadyCapturing));
        assert_eq!(session.capture().await, Err(CaptureError::AlreadyCapturing));

        let photo = first.await.unwrap().unwrap();
        assert!(photo.file_path.exists());
        assert_eq!(session.capture_state(), CaptureState::Idle);

        // Guard resets, a new capture is accepted
        let again = session.capture().await.unwrap();
        assert_ne!(again.file_path, photo.file_path);

        let _ = std::fs::remove_file(&photo.file_path);
        let _ = std::fs::remove_file(&again.file_path);
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let closes = Arc::new(AtomicUsize::new(0));
        let session = CameraSession::new(Box::new(SlowCamera {
            capture_delay: Duration::ZERO,
            closes: Arc::clone(&closes),
        }));
        session.open(FlashMode::Auto).await.unwrap();

        session.close().await;
        session.close().await;
        drop(session);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_unclosed_session() {
        let closes = Arc::new(AtomicUsize::new(0));
        let session = CameraSession::new(Box::new(SlowCamera {
            capture_delay: Duration::ZERO,
            closes: Arc::clone(&closes),
        }));
        session.open(FlashMode::Auto).await.unwrap();
        drop(session);

        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
