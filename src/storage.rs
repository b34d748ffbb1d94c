// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for photo directories and collision-free naming

use crate::constants::{RAW_CAPTURE_PREFIX, TAGGED_PHOTO_EXTENSION, TAGGED_PHOTO_PREFIX};
use chrono::TimeZone;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::info;

/// Last timestamp handed out, in milliseconds. Ratcheted so two
/// captures in the same process millisecond still get distinct names.
static LAST_STAMP_MS: AtomicI64 = AtomicI64::new(0);

/// Get the photo save directory (~/Pictures/geocam)
pub fn get_photo_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join("Pictures")
        })
        .join("geocam")
}

/// Get the gallery directory (~/Pictures/geocam/gallery) where
/// confirmed photos are persisted
pub fn get_gallery_directory() -> PathBuf {
    get_photo_directory().join("gallery")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory(dir: &Path) -> Result<(), std::io::Error> {
    std::fs::create_dir_all(dir)?;
    info!(path = %dir.display(), "Directory ready");
    Ok(())
}

/// Hand out the next timestamp in milliseconds, strictly greater than
/// any previously handed out in this process run
pub fn next_stamp_millis() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    LAST_STAMP_MS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
            Some(now.max(prev + 1))
        })
        .map(|prev| now.max(prev + 1))
        .unwrap_or(now)
}

/// Filename stem for a given stamp, e.g. "20260828_153012_345"
fn stamp_stem(stamp_ms: i64) -> String {
    let dt = chrono::Local
        .timestamp_millis_opt(stamp_ms)
        .single()
        .unwrap_or_else(chrono::Local::now);
    format!("{}_{:03}", dt.format("%Y%m%d_%H%M%S"), stamp_ms.rem_euclid(1000))
}

/// Build the path for the next tagged photo in `dir`
///
/// Returns the path and the stamp used, so the caller can record
/// the creation time alongside the file.
pub fn next_tagged_photo_path(dir: &Path) -> (PathBuf, i64) {
    let stamp = next_stamp_millis();
    let filename = format!(
        "{}_{}.{}",
        TAGGED_PHOTO_PREFIX,
        stamp_stem(stamp),
        TAGGED_PHOTO_EXTENSION
    );
    (dir.join(filename), stamp)
}

/// Build a scratch path for a raw capture in the system temp directory
pub fn next_raw_capture_path() -> (PathBuf, i64) {
    let stamp = next_stamp_millis();
    let filename = format!(
        "{}_{}.{}",
        RAW_CAPTURE_PREFIX,
        stamp_stem(stamp),
        TAGGED_PHOTO_EXTENSION
    );
    (std::env::temp_dir().join(filename), stamp)
}
