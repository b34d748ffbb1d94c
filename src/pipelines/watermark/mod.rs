// SPDX-License-Identifier: GPL-3.0-only

//! Watermark pipeline
//!
//! Turns a raw capture into a tagged photo:
//!
//! ```text
//! read bytes → decode → render lat/long text → encode PNG → persist
//! ```
//!
//! Decode and encode are CPU-bound and run under `spawn_blocking`.
//! Any step failure aborts the whole operation with a single error
//! kind, and a failed run never leaves a partial file in the
//! tagged-photo location: the image is encoded fully in memory and
//! the output is removed if the final write fails.

pub mod position;
pub mod text;

use crate::backends::location::GeoFix;
use crate::constants::{
    GlyphScale, MIN_EXPECTED_HEIGHT, MIN_EXPECTED_WIDTH, WATERMARK_INSET_X, WATERMARK_INSET_Y,
};
use crate::errors::WatermarkError;
use crate::storage;
use image::Rgb;
use position::{BlockDimensions, ImageDimensions, anchor_bottom_right};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use text::TextStyle;
use tracing::{debug, info};

/// Watermark rendering style, persisted in the user config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatermarkStyle {
    pub scale: GlyphScale,
    pub inset_x: u32,
    pub inset_y: u32,
    /// Text color as RGB
    pub color: [u8; 3],
    /// Drop-shadow color, None disables the shadow
    pub shadow: Option<[u8; 3]>,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            scale: GlyphScale::default(),
            inset_x: WATERMARK_INSET_X,
            inset_y: WATERMARK_INSET_Y,
            color: [255, 255, 255],
            shadow: Some([0, 0, 0]),
        }
    }
}

/// The text burned into a tagged photo for a given fix
///
/// Latitude and longitude keep their full decimal representation,
/// not a rounded one.
pub fn watermark_text(fix: GeoFix) -> String {
    format!("Lat: {}\n\nLong: {}", fix.latitude, fix.longitude)
}

/// Watermark pipeline: decode, stamp, re-encode, persist
pub struct WatermarkPipeline {
    output_dir: PathBuf,
    style: WatermarkStyle,
}

impl WatermarkPipeline {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            style: WatermarkStyle::default(),
        }
    }

    pub fn with_style(output_dir: PathBuf, style: WatermarkStyle) -> Self {
        Self { output_dir, style }
    }

    /// Tag a raw capture with the location watermark
    ///
    /// Returns the path of the freshly written tagged photo. The raw
    /// file is left in place; discarding it is the caller's choice.
    pub async fn tag_photo(&self, raw_path: &Path, fix: GeoFix) -> Result<PathBuf, WatermarkError> {
        let bytes = tokio::fs::read(raw_path)
            .await
            .map_err(|e| WatermarkError::IoFailed(e.to_string()))?;

        let style = self.style.clone();
        let encoded = tokio::task::spawn_blocking(move || stamp_and_encode(&bytes, fix, &style))
            .await
            .map_err(|e| WatermarkError::EncodeFailed(format!("encoding task failed: {}", e)))??;

        storage::ensure_directory(&self.output_dir)
            .map_err(|e| WatermarkError::IoFailed(e.to_string()))?;
        let (tagged_path, _stamp) = storage::next_tagged_photo_path(&self.output_dir);

        if let Err(e) = tokio::fs::write(&tagged_path, &encoded).await {
            // Never leave a partial file in the tagged-photo location
            let _ = tokio::fs::remove_file(&tagged_path).await;
            return Err(WatermarkError::IoFailed(e.to_string()));
        }

        info!(
            raw = %raw_path.display(),
            tagged = %tagged_path.display(),
            "Photo tagged"
        );
        Ok(tagged_path)
    }
}

/// Decode raw bytes, burn the watermark in, re-encode as lossless PNG
fn stamp_and_encode(
    bytes: &[u8],
    fix: GeoFix,
    style: &WatermarkStyle,
) -> Result<Vec<u8>, WatermarkError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| WatermarkError::DecodeFailed(e.to_string()))?;
    let mut rgb = decoded.to_rgb8();

    if rgb.width() < MIN_EXPECTED_WIDTH || rgb.height() < MIN_EXPECTED_HEIGHT {
        debug!(
            width = rgb.width(),
            height = rgb.height(),
            "Frame below expected minimum, placement will clamp"
        );
    }

    let scale = style.scale.factor();
    let label = watermark_text(fix);
    let (block_w, block_h) = text::measure_block(&label, scale);
    let placement = anchor_bottom_right(
        ImageDimensions {
            width: rgb.width(),
            height: rgb.height(),
        },
        BlockDimensions {
            width: block_w,
            height: block_h,
        },
        style.inset_x,
        style.inset_y,
    );

    debug!(
        width = rgb.width(),
        height = rgb.height(),
        x = placement.x,
        y = placement.y,
        "Stamping watermark"
    );

    let text_style = TextStyle {
        scale,
        color: Rgb(style.color),
        shadow: style.shadow.map(Rgb),
    };
    text::draw_block(&mut rgb, &label, placement.x, placement.y, &text_style);

    // Lossless re-encode so the stamped text never picks up artifacts
    let mut buffer = Vec::new();
    rgb.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .map_err(|e| WatermarkError::EncodeFailed(e.to_string()))?;

    Ok(buffer)
}
