// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "geocam")]
#[command(about = "Location-stamping camera capture flow")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Burn a latitude/longitude watermark into an existing image
    Tag {
        /// Image to tag
        input: PathBuf,

        /// Latitude of the fix
        #[arg(long)]
        lat: f64,

        /// Longitude of the fix
        #[arg(long)]
        long: f64,

        /// Output directory (default: ~/Pictures/geocam)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Run the full flow: acquire fix, capture from a source image,
    /// tag, and optionally save/share
    Snap {
        /// Source image standing in for the camera feed
        #[arg(long)]
        from: PathBuf,

        /// Latitude of the fix
        #[arg(long)]
        lat: f64,

        /// Longitude of the fix
        #[arg(long)]
        long: f64,

        /// Persist the tagged photo to the gallery
        #[arg(long)]
        save: bool,

        /// Hand the tagged photo to the OS share surface
        #[arg(long)]
        share: bool,
    },

    /// Persist a tagged photo to the gallery directory
    Save {
        /// Photo to persist
        file: PathBuf,
    },

    /// Hand a photo to the OS share surface
    Share {
        /// Photo to share
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=geocam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tag {
            input,
            lat,
            long,
            output_dir,
        } => cli::tag_photo(input, lat, long, output_dir).await,
        Commands::Snap {
            from,
            lat,
            long,
            save,
            share,
        } => cli::snap(from, lat, long, save, share).await,
        Commands::Save { file } => cli::save_photo(file).await,
        Commands::Share { file } => cli::share_photo(file),
    }
}
