// SPDX-License-Identifier: GPL-3.0-only

//! Screen flow controller
//!
//! Sequences location acquisition, camera session, watermark pipeline
//! and photo review. The home screen is a state machine over
//! {AwaitingLocation, LocationFailed, Ready}; camera entry is only
//! permitted from Ready, and the fix acquired there stays valid for
//! the whole capture session even if location later degrades.

use crate::app::review::PhotoReviewFlow;
use crate::app::state::{CaptureState, FlowState, ReviewState};
use crate::backends::camera::{CameraSession, FlashMode, StillCamera};
use crate::backends::location::{GeoFix, LocationProvider, ServiceStatus};
use crate::errors::{AppError, AppResult, CaptureError, GalleryError};
use crate::pipelines::watermark::WatermarkPipeline;
use futures::stream::BoxStream;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Home screen controller: gates camera entry on a location fix
pub struct ScreenFlowController {
    provider: LocationProvider,
    state: FlowState,
    fix: Option<GeoFix>,
}

impl ScreenFlowController {
    pub fn new(provider: LocationProvider) -> Self {
        Self {
            provider,
            state: FlowState::AwaitingLocation,
            fix: None,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// The acquired fix, available once Ready
    pub fn fix(&self) -> Option<GeoFix> {
        self.fix
    }

    /// Camera entry is only permitted from Ready
    pub fn can_enter_camera(&self) -> bool {
        self.state.is_ready()
    }

    /// Attempt to acquire a fix, transitioning to Ready or LocationFailed
    pub async fn acquire_fix(&mut self) -> &FlowState {
        self.state = FlowState::AwaitingLocation;
        match self.provider.current_fix().await {
            Ok(fix) => {
                self.fix = Some(fix);
                self.state = FlowState::Ready;
            }
            Err(err) => {
                warn!(error = %err, "Location acquisition failed");
                if err.needs_system_settings() {
                    // Only the system settings can restore the grant,
                    // so retrying in-app is pointless: surface the
                    // deep link instead
                    info!("Permission must be granted from system settings");
                    self.provider.open_settings();
                }
                self.state = FlowState::LocationFailed(err);
            }
        }
        &self.state
    }

    /// User-facing retry affordance: back to AwaitingLocation
    pub fn retry(&mut self) {
        if !self.state.is_ready() {
            self.state = FlowState::AwaitingLocation;
        }
    }

    /// Subscribe to the provider's service status stream
    pub fn watch_service_status(&self) -> BoxStream<'static, ServiceStatus> {
        self.provider.watch_service_status()
    }

    /// Deep-link into the system's location settings
    ///
    /// The retry affordance for a permanently denied grant.
    pub fn open_settings(&self) {
        self.provider.open_settings();
    }

    /// React to a service enabled/disabled transition
    ///
    /// Disabled marks the flow failed (unless already Ready - the
    /// acquired fix stays valid). A later Enabled re-attempts
    /// acquisition automatically, without user action.
    pub async fn handle_service_status(&mut self, status: ServiceStatus) {
        match status {
            ServiceStatus::Disabled => {
                if !self.state.is_ready() {
                    self.state =
                        FlowState::LocationFailed(crate::errors::LocationError::ServiceDisabled);
                }
            }
            ServiceStatus::Enabled => {
                if !self.state.is_ready() {
                    info!("Location services re-enabled, re-attempting acquisition");
                    self.acquire_fix().await;
                }
            }
        }
    }

    /// Enter the capture screen
    ///
    /// Opens the camera session around `camera` and hands the acquired
    /// fix over. Fails unless the flow is Ready.
    pub async fn enter_capture_screen(
        &self,
        camera: Box<dyn StillCamera>,
        flash: FlashMode,
        pipeline: WatermarkPipeline,
        review_flow: PhotoReviewFlow,
    ) -> AppResult<CaptureScreen> {
        let Some(fix) = self.fix.filter(|_| self.can_enter_camera()) else {
            return Err(AppError::Capture(CaptureError::NotReady));
        };

        let session = CameraSession::new(camera);
        session.open(flash).await?;

        Ok(CaptureScreen {
            session,
            pipeline,
            review_flow,
            fix,
            review: ReviewState::Live,
            busy: false,
            torn_down: false,
        })
    }
}

/// Capture screen: live feed, capture+tag, and photo review
///
/// The busy flag spans the whole capture-and-watermark operation, so
/// a photo is never shown in Preview before its watermark step has
/// completed, and re-entrant capture requests bounce for the whole
/// duration.
pub struct CaptureScreen {
    session: CameraSession,
    pipeline: WatermarkPipeline,
    review_flow: PhotoReviewFlow,
    fix: GeoFix,
    review: ReviewState,
    busy: bool,
    torn_down: bool,
}

impl CaptureScreen {
    pub fn review_state(&self) -> &ReviewState {
        &self.review
    }

    /// The fix this session stamps into photos
    pub fn fix(&self) -> GeoFix {
        self.fix
    }

    /// Busy for the whole capture+watermark span
    pub fn capture_state(&self) -> CaptureState {
        if self.busy {
            CaptureState::Capturing
        } else {
            CaptureState::Idle
        }
    }

    /// Capture a still, burn the watermark in, move to Preview
    ///
    /// Failures abort the in-flight capture, reset the busy guard so
    /// a retry is possible, and surface one error; the review state is
    /// left untouched.
    ///
    /// Exclusive access makes the torn-down check at entry sufficient:
    /// `teardown` also takes `&mut self`, so it can never interleave
    /// with a capture that is still in flight here.
    pub async fn capture_and_tag(&mut self) -> AppResult<()> {
        if self.torn_down {
            return Err(AppError::Capture(CaptureError::NotReady));
        }
        if self.busy {
            return Err(AppError::Capture(CaptureError::AlreadyCapturing));
        }

        self.busy = true;
        let result = self.run_capture().await;
        self.busy = false;

        match result {
            Ok(tagged) => {
                self.review = ReviewState::Preview(tagged);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Capture aborted");
                Err(e)
            }
        }
    }

    async fn run_capture(&self) -> AppResult<crate::backends::camera::CapturedPhoto> {
        let raw = self.session.capture().await?;

        let tagged_path = match self.pipeline.tag_photo(&raw.file_path, self.fix).await {
            Ok(path) => path,
            Err(e) => {
                // Raw cleanup is best-effort, not contractual
                let _ = tokio::fs::remove_file(&raw.file_path).await;
                return Err(e.into());
            }
        };
        let _ = tokio::fs::remove_file(&raw.file_path).await;

        Ok(crate::backends::camera::CapturedPhoto {
            file_path: tagged_path,
            created_at_millis: raw.created_at_millis,
        })
    }

    /// Discard the previewed photo and return to the live feed
    pub async fn retake(&mut self) {
        self.review_flow.retake(&mut self.review).await;
    }

    /// Persist the previewed photo to the gallery
    ///
    /// Failure leaves the preview in place so the user may retry.
    pub async fn confirm(&self) -> Result<PathBuf, GalleryError> {
        let Some(photo) = self.review.photo() else {
            return Err(GalleryError::SaveFailed("no photo in preview".to_string()));
        };
        self.review_flow.confirm(photo).await
    }

    /// Hand the previewed photo to the share surface, fire-and-forget
    pub fn share(&self) {
        if let Some(photo) = self.review.photo() {
            self.review_flow.share(photo);
        }
    }

    /// Tear the screen down, releasing the camera session
    ///
    /// Idempotent; safe on every exit path. Capture requests arriving
    /// afterwards fail with [`CaptureError::NotReady`].
    pub async fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.session.close().await;
    }
}
