// SPDX-License-Identifier: GPL-3.0-only

//! Screen flow state machines

use crate::backends::camera::CapturedPhoto;
pub use crate::backends::camera::CaptureState;
use crate::errors::LocationError;

/// Home screen state: location acquisition gates camera entry
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Waiting for a location fix (initial state)
    AwaitingLocation,
    /// Acquisition failed; surfaces a retry affordance
    LocationFailed(LocationError),
    /// Fix obtained; camera entry enabled
    Ready,
}

impl FlowState {
    pub fn is_ready(&self) -> bool {
        matches!(self, FlowState::Ready)
    }

    /// The failure behind LocationFailed, if any
    pub fn failure(&self) -> Option<&LocationError> {
        match self {
            FlowState::LocationFailed(err) => Some(err),
            _ => None,
        }
    }
}

/// Capture screen state: live feed or finished-photo preview
///
/// Mutually exclusive, exactly one active at a time. A photo reaching
/// Preview always has its watermark burned in already.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReviewState {
    /// Camera feed visible
    #[default]
    Live,
    /// Finished photo visible with retake/confirm/share actions
    Preview(CapturedPhoto),
}

impl ReviewState {
    pub fn is_live(&self) -> bool {
        matches!(self, ReviewState::Live)
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, ReviewState::Preview(_))
    }

    /// The previewed photo, if any
    pub fn photo(&self) -> Option<&CapturedPhoto> {
        match self {
            ReviewState::Live => None,
            ReviewState::Preview(photo) => Some(photo),
        }
    }

    /// Take the previewed photo, returning to Live
    pub fn take_photo(&mut self) -> Option<CapturedPhoto> {
        match std::mem::take(self) {
            ReviewState::Live => None,
            ReviewState::Preview(photo) => Some(photo),
        }
    }
}
