// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};

/// Filename prefix for tagged photos
pub const TAGGED_PHOTO_PREFIX: &str = "IMG";

/// Filename prefix for raw (un-watermarked) captures
pub const RAW_CAPTURE_PREFIX: &str = "RAW";

/// Tagged photos are always written in a lossless format so the
/// stamped text never picks up compression artifacts
pub const TAGGED_PHOTO_EXTENSION: &str = "png";

/// Horizontal inset between the text block's right edge and the
/// image's right edge, in pixels. Cosmetic, not contractual.
pub const WATERMARK_INSET_X: u32 = 32;

/// Vertical inset between the text block's bottom edge and the
/// image's bottom edge, in pixels. Cosmetic, not contractual.
pub const WATERMARK_INSET_Y: u32 = 32;

/// Extra vertical pixels between text lines, per glyph-scale unit
pub const WATERMARK_LINE_GAP: u32 = 2;

/// Smallest frame size the default watermark style is tuned for.
/// Below this the placement clamps to keep text inside the frame.
pub const MIN_EXPECTED_WIDTH: u32 = 640;
pub const MIN_EXPECTED_HEIGHT: u32 = 480;

/// Watermark glyph scale presets
///
/// The embedded font is an 8x8 bitmap; the scale multiplies each
/// glyph pixel so text stays legible at camera resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GlyphScale {
    /// 16px glyphs - small overlays, low resolutions
    Small,
    /// 24px glyphs - tuned for 1080p frames (default)
    #[default]
    Medium,
    /// 32px glyphs - 4K frames
    Large,
}

impl GlyphScale {
    /// Get all scale variants for UI iteration
    pub const ALL: [GlyphScale; 3] = [GlyphScale::Small, GlyphScale::Medium, GlyphScale::Large];

    /// Get display name for the scale
    pub fn display_name(&self) -> &'static str {
        match self {
            GlyphScale::Small => "Small",
            GlyphScale::Medium => "Medium",
            GlyphScale::Large => "Large",
        }
    }

    /// Pixel multiplier applied to each bit of the 8x8 glyph grid
    pub fn factor(&self) -> u32 {
        match self {
            GlyphScale::Small => 2,
            GlyphScale::Medium => 3,
            GlyphScale::Large => 4,
        }
    }
}
