// SPDX-License-Identifier: GPL-3.0-only

use camera_preview::backends::camera::types::CameraBackendType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "camera-preview")]
#[command(about = "Camera preview with blurred camera-switch transitions")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.config/camera-preview/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    Synthetic,
    Image,
}

impl From<Backend> for CameraBackendType {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Synthetic => CameraBackendType::Synthetic,
            Backend::Image => CameraBackendType::Image,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the camera and switch between front and back
    Demo {
        /// Camera provider (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,

        /// Start on the front camera
        #[arg(short, long)]
        front: bool,

        /// Start on the back camera
        #[arg(long, conflicts_with = "front")]
        back: bool,

        /// Number of camera switches to perform
        #[arg(short, long, default_value = "3")]
        switches: u32,

        /// Time between switches in milliseconds
        #[arg(short, long, default_value = "500")]
        interval_ms: u64,

        /// Save each transition overlay image into this directory
        #[arg(long)]
        save_overlays: Option<PathBuf>,
    },

    /// Apply the transition blur to an image file
    Blur {
        /// Input image
        input: PathBuf,

        /// Output file path (default: <input>_blurred.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Downsample factor
        #[arg(long)]
        scale: Option<f32>,

        /// Stack blur radius
        #[arg(long)]
        radius: Option<u32>,
    },

    /// Take a still photo through the session
    Photo {
        /// Use the front camera
        #[arg(short, long)]
        front: bool,

        /// Use the back camera
        #[arg(long, conflicts_with = "front")]
        back: bool,

        /// Output file path (default: ~/Pictures/camera/photo_TIMESTAMP.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List cameras offered by a backend
    List {
        /// Camera provider (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,
    },

    /// Write the config file
    InitConfig {
        /// Write the loaded config instead of the defaults
        #[arg(long)]
        current: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=camera_preview=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Demo {
            backend,
            front,
            back,
            switches,
            interval_ms,
            save_overlays,
        } => {
            let facing = cli::resolve_facing(&config, front, back);
            cli::run_demo(
                config,
                backend.map(Into::into),
                facing,
                switches,
                interval_ms,
                save_overlays,
            )
        }
        Commands::Blur {
            input,
            output,
            scale,
            radius,
        } => cli::blur_image(&config, &input, output, scale, radius),
        Commands::Photo {
            front,
            back,
            output,
        } => {
            let facing = cli::resolve_facing(&config, front, back);
            cli::take_photo(config, facing, output)
        }
        Commands::List { backend } => cli::list_cameras(config, backend.map(Into::into)),
        Commands::InitConfig { current, force } => {
            cli::write_config(&config, cli.config.as_deref(), current, force)
        }
    }
}
