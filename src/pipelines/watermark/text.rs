// SPDX-License-Identifier: GPL-3.0-only

//! Bitmap text rendering onto pixel buffers
//!
//! Renders multi-line text with the embedded font8x8 glyph set,
//! scaled up by an integer factor so it stays legible at camera
//! resolutions. Drawing is bounds-checked; glyph pixels falling
//! outside the buffer are dropped rather than wrapped.

use crate::constants::WATERMARK_LINE_GAP;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Side length of one unscaled glyph cell
pub const GLYPH_SIZE: u32 = 8;

/// Rendering style for a text block
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Integer pixel multiplier for each glyph bit
    pub scale: u32,
    /// Text color
    pub color: Rgb<u8>,
    /// Optional drop-shadow color, offset one scale unit down-right
    pub shadow: Option<Rgb<u8>>,
}

/// Measure a multi-line text block at the given scale
///
/// Lines are split on '\n'; empty lines contribute no width but a
/// full line of height, so "a\n\nb" renders with a blank line between.
pub fn measure_block(text: &str, scale: u32) -> (u32, u32) {
    let mut width = 0u32;
    let mut lines = 0u32;
    for line in text.split('\n') {
        width = width.max(line.chars().count() as u32 * GLYPH_SIZE * scale);
        lines += 1;
    }
    if lines == 0 {
        return (0, 0);
    }
    let height = lines * GLYPH_SIZE * scale + (lines - 1) * WATERMARK_LINE_GAP * scale;
    (width, height)
}

/// Draw a multi-line text block with its top-left corner at (x, y)
pub fn draw_block(img: &mut RgbImage, text: &str, x: u32, y: u32, style: &TextStyle) {
    let line_advance = (GLYPH_SIZE + WATERMARK_LINE_GAP) * style.scale;
    for (index, line) in text.split('\n').enumerate() {
        let line_y = y + index as u32 * line_advance;
        if let Some(shadow) = style.shadow {
            draw_line(img, line, x + style.scale, line_y + style.scale, style.scale, shadow);
        }
        draw_line(img, line, x, line_y, style.scale, style.color);
    }
}

fn draw_line(img: &mut RgbImage, line: &str, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let mut cursor_x = x;
    for ch in line.chars() {
        draw_glyph(img, ch, cursor_x, y, scale, color);
        cursor_x += GLYPH_SIZE * scale;
    }
}

fn draw_glyph(img: &mut RgbImage, ch: char, x: u32, y: u32, scale: u32, color: Rgb<u8>) {
    let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
        return;
    };
    for (row_idx, &row) in glyph.iter().enumerate() {
        for col_idx in 0..GLYPH_SIZE {
            if (row >> col_idx) & 1 == 0 {
                continue;
            }
            let px = x + col_idx * scale;
            let py = y + row_idx as u32 * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    let tx = px + sx;
                    let ty = py + sy;
                    if tx < img.width() && ty < img.height() {
                        img.put_pixel(tx, ty, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_single_line() {
        let (w, h) = measure_block("Lat: 1.5", 3);
        assert_eq!(w, 8 * 8 * 3);
        assert_eq!(h, 8 * 3);
    }

    #[test]
    fn test_measure_counts_blank_lines() {
        let (_, one) = measure_block("a", 2);
        let (_, three) = measure_block("a\n\nb", 2);
        assert_eq!(three, one * 3 + 2 * WATERMARK_LINE_GAP * 2);
    }

    #[test]
    fn test_measure_width_is_longest_line() {
        let (w, _) = measure_block("ab\nabcd\nc", 1);
        assert_eq!(w, 4 * 8);
    }

    #[test]
    fn test_draw_marks_pixels() {
        let mut img = RgbImage::new(200, 60);
        let style = TextStyle {
            scale: 2,
            color: Rgb([255, 255, 255]),
            shadow: None,
        };
        draw_block(&mut img, "Lat", 4, 4, &style);
        let lit = img.pixels().filter(|p| p.0 == [255, 255, 255]).count();
        assert!(lit > 0, "rendered text should mark pixels");
    }

    #[test]
    fn test_draw_out_of_bounds_is_clipped() {
        let mut img = RgbImage::new(10, 10);
        let style = TextStyle {
            scale: 4,
            color: Rgb([255, 255, 255]),
            shadow: Some(Rgb([0, 0, 0])),
        };
        // Must not panic even though the glyphs overflow the buffer
        draw_block(&mut img, "overflow", 0, 0, &style);
    }
}
