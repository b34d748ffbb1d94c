// SPDX-License-Identifier: GPL-3.0-only

//! Shared test doubles and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use futures::stream::BoxStream;
use geocam::backends::camera::{FlashMode, StillCamera};
use geocam::backends::location::{GeoFix, Permission, PositionSource, ServiceStatus};
use geocam::backends::share::ShareSurface;
use geocam::errors::{CaptureError, LocationError};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Write a solid-color PNG fixture and return its path
pub fn png_fixture(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_pixel(width, height, Rgb([40, 80, 120]));
    img.save(&path).expect("write fixture");
    path
}

/// Camera that synthesizes a solid-color frame per capture
pub struct SyntheticCamera {
    pub width: u32,
    pub height: u32,
    pub fail_capture: bool,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fail_capture: false,
        }
    }
}

#[async_trait]
impl StillCamera for SyntheticCamera {
    async fn open(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    async fn set_flash(&mut self, _mode: FlashMode) -> Result<(), CaptureError> {
        Ok(())
    }

    async fn capture_still(&mut self, output: &Path) -> Result<(), CaptureError> {
        if self.fail_capture {
            return Err(CaptureError::DeviceError("synthetic failure".to_string()));
        }
        let img = RgbImage::from_pixel(self.width, self.height, Rgb([40, 80, 120]));
        img.save(output)
            .map_err(|e| CaptureError::DeviceError(e.to_string()))
    }

    fn close(&mut self) {}
}

/// Position source with scripted permission and fix responses
pub struct ScriptedPositionSource {
    pub enabled: Arc<Mutex<bool>>,
    pub check: Permission,
    /// Responses popped front-first on each permission request
    pub requests: Mutex<Vec<Permission>>,
    /// Responses popped front-first on each position fetch
    pub fixes: Mutex<Vec<Result<GeoFix, LocationError>>>,
    /// Scripted service status transitions, replayed by the stream
    pub statuses: Mutex<Vec<ServiceStatus>>,
    /// Count of settings deep-link invocations
    pub settings_opened: Arc<Mutex<usize>>,
}

impl ScriptedPositionSource {
    pub fn granted_with_fix(fix: GeoFix) -> Self {
        Self {
            enabled: Arc::new(Mutex::new(true)),
            check: Permission::Granted,
            requests: Mutex::new(Vec::new()),
            fixes: Mutex::new(vec![Ok(fix)]),
            statuses: Mutex::new(Vec::new()),
            settings_opened: Arc::default(),
        }
    }

    pub fn denying() -> Self {
        Self {
            enabled: Arc::new(Mutex::new(true)),
            check: Permission::Denied,
            requests: Mutex::new(vec![Permission::Denied, Permission::Denied]),
            fixes: Mutex::new(Vec::new()),
            statuses: Mutex::new(Vec::new()),
            settings_opened: Arc::default(),
        }
    }

    pub fn denied_forever() -> Self {
        Self {
            enabled: Arc::new(Mutex::new(true)),
            check: Permission::DeniedForever,
            requests: Mutex::new(Vec::new()),
            fixes: Mutex::new(Vec::new()),
            statuses: Mutex::new(Vec::new()),
            settings_opened: Arc::default(),
        }
    }

    fn pop_front<T>(list: &Mutex<Vec<T>>) -> Option<T> {
        let mut list = list.lock().unwrap();
        if list.is_empty() { None } else { Some(list.remove(0)) }
    }
}

#[async_trait]
impl PositionSource for ScriptedPositionSource {
    async fn is_service_enabled(&self) -> bool {
        *self.enabled.lock().unwrap()
    }

    async fn check_permission(&self) -> Permission {
        self.check
    }

    async fn request_permission(&self) -> Permission {
        Self::pop_front(&self.requests).unwrap_or(Permission::Denied)
    }

    async fn position(&self) -> Result<GeoFix, LocationError> {
        Self::pop_front(&self.fixes)
            .unwrap_or_else(|| Err(LocationError::Unavailable("script exhausted".to_string())))
    }

    fn service_status_stream(&self) -> BoxStream<'static, ServiceStatus> {
        let statuses: Vec<ServiceStatus> = self.statuses.lock().unwrap().clone();
        Box::pin(async_stream::stream! {
            for status in statuses {
                yield status;
            }
        })
    }

    fn open_settings(&self) {
        *self.settings_opened.lock().unwrap() += 1;
    }
}

/// Share surface that records presented paths
#[derive(Default)]
pub struct RecordingShare {
    pub presented: Arc<Mutex<Vec<PathBuf>>>,
}

impl ShareSurface for RecordingShare {
    fn present(&self, path: &Path) {
        self.presented.lock().unwrap().push(path.to_path_buf());
    }
}
