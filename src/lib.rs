// SPDX-License-Identifier: GPL-3.0-only

//! geocam - a location-stamping camera capture flow
//!
//! This library drives a "GPS camera" screen flow: acquire a device
//! location fix, capture a still photo, burn a latitude/longitude
//! text watermark into the pixels, and offer retake / save / share
//! actions over the finished file.
//!
//! # Architecture
//!
//! - [`app`]: screen flow controller and review state machines
//! - [`backends`]: platform collaborator boundaries (camera, location,
//!   gallery, share)
//! - [`pipelines`]: the capture → decode → stamp → encode → persist
//!   watermark pipeline
//! - [`config`]: user configuration handling
//! - [`storage`]: photo directories and collision-free naming

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{CaptureScreen, CaptureState, FlowState, ReviewState, ScreenFlowController};
pub use backends::camera::{CameraSession, CapturedPhoto, FlashMode};
pub use backends::location::{GeoFix, LocationProvider, ServiceStatus};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use pipelines::watermark::WatermarkPipeline;
