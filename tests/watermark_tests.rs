// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the watermark pipeline

mod common;

use geocam::GeoFix;
use geocam::pipelines::watermark::WatermarkPipeline;
use image::GenericImageView;
use std::collections::HashSet;

#[tokio::test]
async fn test_tagging_preserves_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = WatermarkPipeline::new(dir.path().join("tagged"));

    for (w, h) in [(1920, 1080), (1280, 720), (640, 480)] {
        let raw = common::png_fixture(dir.path(), &format!("raw_{}x{}.png", w, h), w, h);
        let tagged = pipeline
            .tag_photo(&raw, GeoFix::new(12.34, -56.78))
            .await
            .unwrap();
        let decoded = image::open(&tagged).unwrap();
        assert_eq!(decoded.dimensions(), (w, h));
    }
}

#[tokio::test]
async fn test_end_to_end_stamp_lands_in_bottom_right_quadrant() {
    let dir = tempfile::tempdir().unwrap();
    let raw = common::png_fixture(dir.path(), "raw.png", 1920, 1080);
    let pipeline = WatermarkPipeline::new(dir.path().join("tagged"));

    let tagged = pipeline
        .tag_photo(&raw, GeoFix::new(37.7749, -122.4194))
        .await
        .unwrap();

    // Lossless format, decodable back to the same dimensions
    let decoded = image::open(&tagged).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (1920, 1080));

    // Stamped text pixels appear in the bottom-right quadrant and
    // nowhere else (the fixture is a uniform non-white color)
    let mut inside = 0usize;
    let mut outside = 0usize;
    for (x, y, pixel) in decoded.enumerate_pixels() {
        if pixel.0 == [255, 255, 255] {
            if x >= 960 && y >= 540 {
                inside += 1;
            } else {
                outside += 1;
            }
        }
    }
    assert!(inside > 0, "watermark text must be rendered");
    assert_eq!(outside, 0, "watermark must stay in the bottom-right quadrant");
}

#[tokio::test]
async fn test_rapid_captures_get_distinct_paths() {
    let dir = tempfile::tempdir().unwrap();
    let raw = common::png_fixture(dir.path(), "raw.png", 640, 480);
    let pipeline = WatermarkPipeline::new(dir.path().join("tagged"));

    let mut paths = HashSet::new();
    for _ in 0..10 {
        let tagged = pipeline.tag_photo(&raw, GeoFix::new(1.0, 2.0)).await.unwrap();
        assert!(tagged.exists());
        assert!(paths.insert(tagged), "tagged paths must never collide");
    }
}

#[tokio::test]
async fn test_tiny_image_still_keeps_text_in_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let raw = common::png_fixture(dir.path(), "tiny.png", 64, 48);
    let pipeline = WatermarkPipeline::new(dir.path().join("tagged"));

    // Below the minimum expected resolution the placement clamps;
    // tagging must neither fail nor resize the frame
    let tagged = pipeline.tag_photo(&raw, GeoFix::new(89.9, 179.9)).await.unwrap();
    let decoded = image::open(&tagged).unwrap();
    assert_eq!(decoded.dimensions(), (64, 48));
}
