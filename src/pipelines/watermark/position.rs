// SPDX-License-Identifier: GPL-3.0-only

//! Placement calculation for the watermark text block
//!
//! The text is anchored bottom-right: its right edge sits a fixed
//! inset from the image's right edge and its bottom a fixed inset
//! from the image's bottom edge. Exact insets are cosmetic; the
//! contract is that the block stays inside the frame, so placement
//! clamps toward the origin when the image is smaller than expected.

/// Dimensions of the target image
#[derive(Debug, Clone, Copy)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Dimensions of the rendered text block
#[derive(Debug, Clone, Copy)]
pub struct BlockDimensions {
    pub width: u32,
    pub height: u32,
}

/// Top-left corner where the block should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
}

/// Anchor a text block to the bottom-right corner of an image
pub fn anchor_bottom_right(
    image: ImageDimensions,
    block: BlockDimensions,
    inset_x: u32,
    inset_y: u32,
) -> Placement {
    Placement {
        x: image.width.saturating_sub(block.width + inset_x),
        y: image.height.saturating_sub(block.height + inset_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_right_anchor() {
        let image = ImageDimensions {
            width: 1920,
            height: 1080,
        };
        let block = BlockDimensions {
            width: 360,
            height: 80,
        };
        let placement = anchor_bottom_right(image, block, 32, 32);
        assert_eq!(placement, Placement { x: 1528, y: 968 });
    }

    #[test]
    fn test_block_lands_in_bottom_right_quadrant() {
        let image = ImageDimensions {
            width: 1920,
            height: 1080,
        };
        let block = BlockDimensions {
            width: 400,
            height: 100,
        };
        let placement = anchor_bottom_right(image, block, 32, 32);
        assert!(placement.x >= image.width / 2);
        assert!(placement.y >= image.height / 2);
    }

    #[test]
    fn test_small_image_clamps_to_origin() {
        let image = ImageDimensions {
            width: 100,
            height: 40,
        };
        let block = BlockDimensions {
            width: 360,
            height: 80,
        };
        let placement = anchor_bottom_right(image, block, 32, 32);
        assert_eq!(placement, Placement { x: 0, y: 0 });
    }
}
