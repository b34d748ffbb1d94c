// SPDX-License-Identifier: GPL-3.0-only

//! OS share surface boundary
//!
//! Presenting a file to the share surface is fire-and-forget: the
//! surface owns its own failure UI, so nothing propagates back into
//! pipeline state.

use std::path::Path;
use tracing::{info, warn};

pub trait ShareSurface: Send + Sync {
    /// Hand a file to the OS share surface. No result is observed.
    fn present(&self, path: &Path);
}

/// Share surface backed by the system opener
pub struct SystemShare;

impl ShareSurface for SystemShare {
    fn present(&self, path: &Path) {
        info!(path = %path.display(), "Presenting photo to share surface");
        if let Err(e) = open::that_detached(path) {
            // Logged only; the share surface owns its own failure UI
            warn!(error = %e, "System opener failed");
        }
    }
}
