// SPDX-License-Identifier: GPL-3.0-only

//! Screen flow orchestration
//!
//! - `state`: flow and review state machines
//! - `flow`: home-screen controller and capture screen
//! - `review`: retake/confirm/share actions

mod flow;
mod review;
mod state;

pub use flow::{CaptureScreen, ScreenFlowController};
pub use review::PhotoReviewFlow;
pub use state::{CaptureState, FlowState, ReviewState};
