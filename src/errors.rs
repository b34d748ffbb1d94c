// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture flow

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Location acquisition errors
    Location(LocationError),
    /// Camera capture errors
    Capture(CaptureError),
    /// Watermark pipeline errors
    Watermark(WatermarkError),
    /// Gallery persistence errors
    Gallery(GalleryError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Location acquisition errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// Location services are switched off on the device
    ServiceDisabled,
    /// Permission was denied after a single in-app request
    PermissionDenied,
    /// Permission is permanently denied and can only be granted
    /// from the system settings, outside the app
    PermissionDeniedForever,
    /// Provider could not produce a fix
    Unavailable(String),
}

impl LocationError {
    /// Whether resolving this error requires leaving the app for
    /// the system settings
    pub fn needs_system_settings(&self) -> bool {
        matches!(self, LocationError::PermissionDeniedForever)
    }
}

/// Camera capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Session is not in the Ready state
    NotReady,
    /// A capture for this session is already in flight
    AlreadyCapturing,
    /// The camera device reported a failure
    DeviceError(String),
}

/// Watermark pipeline errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatermarkError {
    /// Raw capture bytes were not a recognizable image
    DecodeFailed(String),
    /// Re-encoding the stamped buffer failed
    EncodeFailed(String),
    /// Reading the raw capture or writing the tagged file failed
    IoFailed(String),
}

/// Gallery persistence errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryError {
    /// The media store rejected or failed the save
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Location(e) => write!(f, "Location error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Watermark(e) => write!(f, "Watermark error: {}", e),
            AppError::Gallery(e) => write!(f, "Gallery error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::ServiceDisabled => write!(f, "Location services are disabled"),
            LocationError::PermissionDenied => write!(f, "Location permission denied"),
            LocationError::PermissionDeniedForever => {
                write!(f, "Location permission permanently denied")
            }
            LocationError::Unavailable(msg) => write!(f, "Location unavailable: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NotReady => write!(f, "Camera session is not ready"),
            CaptureError::AlreadyCapturing => write!(f, "A capture is already in flight"),
            CaptureError::DeviceError(msg) => write!(f, "Camera device error: {}", msg),
        }
    }
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatermarkError::DecodeFailed(msg) => write!(f, "Decode failed: {}", msg),
            WatermarkError::EncodeFailed(msg) => write!(f, "Encode failed: {}", msg),
            WatermarkError::IoFailed(msg) => write!(f, "I/O failed: {}", msg),
        }
    }
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::SaveFailed(msg) => write!(f, "Gallery save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for LocationError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for WatermarkError {}
impl std::error::Error for GalleryError {}

// Conversions from sub-errors to AppError
impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        AppError::Location(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<WatermarkError> for AppError {
    fn from(err: WatermarkError) -> Self {
        AppError::Watermark(err)
    }
}

impl From<GalleryError> for AppError {
    fn from(err: GalleryError) -> Self {
        AppError::Gallery(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for WatermarkError {
    fn from(err: std::io::Error) -> Self {
        WatermarkError::IoFailed(err.to_string())
    }
}
