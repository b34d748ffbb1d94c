// SPDX-License-Identifier: GPL-3.0-only

//! Location backend
//!
//! Wraps a platform position source behind the [`PositionSource`] trait
//! and layers the permission policy on top: check the existing grant,
//! request once if denied, and distinguish a plain denial from a
//! permanent one (the latter can only be fixed in system settings).

use crate::errors::LocationError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use tracing::{info, warn};

/// A single latitude/longitude reading
///
/// Immutable once obtained; consumed read-only by the watermark
/// pipeline and the display overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Location service availability, as reported by the platform stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Enabled,
    Disabled,
}

/// Result of a permission check or request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Denied with "never ask again" - only system settings can undo this
    DeniedForever,
}

/// Platform position source boundary
///
/// Implementations wrap whatever the platform offers: a GPS plugin,
/// a geoclue portal, or a fixed test coordinate.
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Whether location services are currently switched on
    async fn is_service_enabled(&self) -> bool;

    /// Check the existing permission grant without prompting
    async fn check_permission(&self) -> Permission;

    /// Prompt the user for permission (at most once per acquisition)
    async fn request_permission(&self) -> Permission;

    /// Fetch a single best-effort position
    async fn position(&self) -> Result<GeoFix, LocationError>;

    /// Stream of service enabled/disabled transitions
    fn service_status_stream(&self) -> BoxStream<'static, ServiceStatus>;

    /// Deep-link into the system's location settings, fire-and-forget
    ///
    /// The permanently-denied grant can only be restored there, so
    /// this is the affordance surfaced alongside
    /// [`LocationError::PermissionDeniedForever`].
    fn open_settings(&self) {
        open_system_settings();
    }
}

/// Best-effort deep link into the system's location settings
///
/// Fire-and-forget like the share surface: failures are logged, the
/// flow state never depends on the settings page actually opening.
pub fn open_system_settings() {
    info!("Opening system location settings");
    #[cfg(target_os = "macos")]
    let result = open::that_detached(
        "x-apple.systempreferences:com.apple.preference.security?Privacy_LocationServices",
    );
    #[cfg(target_os = "windows")]
    let result = open::that_detached("ms-settings:privacy-location");
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = open::with_detached("location", "gnome-control-center");

    if let Err(e) = result {
        warn!(error = %e, "Failed to open system settings");
    }
}

/// Location provider: permission policy over a [`PositionSource`]
pub struct LocationProvider {
    source: Box<dyn PositionSource>,
}

impl LocationProvider {
    pub fn new(source: Box<dyn PositionSource>) -> Self {
        Self { source }
    }

    /// Acquire a single best-effort fix
    ///
    /// Permission flow is sequential: check the existing grant; if
    /// denied, request once; if still denied fail with
    /// [`LocationError::PermissionDenied`]; if permanently denied fail
    /// with [`LocationError::PermissionDeniedForever`].
    pub async fn current_fix(&self) -> Result<GeoFix, LocationError> {
        if !self.source.is_service_enabled().await {
            warn!("Location services disabled");
            return Err(LocationError::ServiceDisabled);
        }

        match self.source.check_permission().await {
            Permission::Granted => {}
            Permission::DeniedForever => {
                warn!("Location permission permanently denied");
                return Err(LocationError::PermissionDeniedForever);
            }
            Permission::Denied => {
                info!("Location permission not granted, requesting");
                match self.source.request_permission().await {
                    Permission::Granted => {}
                    Permission::Denied => {
                        warn!("Location permission denied after request");
                        return Err(LocationError::PermissionDenied);
                    }
                    Permission::DeniedForever => {
                        warn!("Location permission permanently denied after request");
                        return Err(LocationError::PermissionDeniedForever);
                    }
                }
            }
        }

        let fix = self.source.position().await?;
        info!(
            latitude = fix.latitude,
            longitude = fix.longitude,
            "Location fix acquired"
        );
        Ok(fix)
    }

    /// Subscribe to service enabled/disabled transitions
    pub fn watch_service_status(&self) -> BoxStream<'static, ServiceStatus> {
        self.source.service_status_stream()
    }

    /// Deep-link into the system's location settings
    pub fn open_settings(&self) {
        self.source.open_settings();
    }
}

/// Position source that always reports a fixed coordinate
///
/// Used by the CLI (which has no GPS hardware behind it) and handy
/// as a deterministic source in tests.
pub struct FixedPositionSource {
    fix: GeoFix,
}

impl FixedPositionSource {
    pub fn new(fix: GeoFix) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl PositionSource for FixedPositionSource {
    async fn is_service_enabled(&self) -> bool {
        true
    }

    async fn check_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    async fn position(&self) -> Result<GeoFix, LocationError> {
        Ok(self.fix)
    }

    fn service_status_stream(&self) -> BoxStream<'static, ServiceStatus> {
        Box::pin(futures::stream::pending())
    }
}
