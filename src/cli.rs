// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for the capture flow
//!
//! The CLI has no GPS or camera hardware behind it; coordinates come
//! from arguments and the camera is file-backed. It exercises the
//! same pipeline and flow code the app screens use.

use geocam::app::PhotoReviewFlow;
use geocam::backends::camera::file::FileCamera;
use geocam::backends::gallery::{DirectoryGallery, MediaGallery};
use geocam::backends::location::{FixedPositionSource, GeoFix, LocationProvider};
use geocam::backends::share::{ShareSurface, SystemShare};
use geocam::pipelines::watermark::WatermarkPipeline;
use geocam::{Config, ScreenFlowController};
use std::path::PathBuf;

/// Run the watermark pipeline over an existing image
pub async fn tag_photo(
    input: PathBuf,
    latitude: f64,
    longitude: f64,
    output_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let dir = output_dir.unwrap_or_else(|| config.output_dir());
    let pipeline = WatermarkPipeline::with_style(dir, config.watermark.clone());

    let tagged = pipeline
        .tag_photo(&input, GeoFix::new(latitude, longitude))
        .await?;
    println!("{}", tagged.display());
    Ok(())
}

/// Run the full screen flow with a file-backed camera
pub async fn snap(
    source: PathBuf,
    latitude: f64,
    longitude: f64,
    save: bool,
    share: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let provider = LocationProvider::new(Box::new(FixedPositionSource::new(GeoFix::new(
        latitude, longitude,
    ))));
    let mut controller = ScreenFlowController::new(provider);

    controller.acquire_fix().await;
    if !controller.can_enter_camera() {
        return Err(format!("location unavailable: {:?}", controller.state()).into());
    }

    let pipeline = WatermarkPipeline::with_style(config.output_dir(), config.watermark.clone());
    let review_flow = PhotoReviewFlow::new(
        Box::new(DirectoryGallery::new(config.gallery_dir())),
        Box::new(SystemShare),
    );

    let mut screen = controller
        .enter_capture_screen(
            Box::new(FileCamera::new(source)),
            config.flash_mode,
            pipeline,
            review_flow,
        )
        .await?;

    let result = screen.capture_and_tag().await;
    match &result {
        Ok(()) => {
            if let Some(photo) = screen.review_state().photo() {
                println!("{}", photo.file_path.display());
            }
            if save {
                let stored = screen.confirm().await?;
                println!("saved: {}", stored.display());
            }
            if share {
                screen.share();
            }
        }
        Err(e) => eprintln!("capture failed: {}", e),
    }

    screen.teardown().await;
    result?;
    Ok(())
}

/// Persist an already-tagged photo to the gallery directory
pub async fn save_photo(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let gallery = DirectoryGallery::new(config.gallery_dir());
    let stored = gallery.persist(&file).await?;
    println!("{}", stored.display());
    Ok(())
}

/// Hand a photo to the OS share surface
pub fn share_photo(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    SystemShare.present(&file);
    Ok(())
}
