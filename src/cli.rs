// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! This module provides command-line functionality for:
//! - Running a switch demo through the event loop
//! - Blurring an image with the transition filter
//! - Taking photos through the session
//! - Listing available cameras
//! - Writing the config file

use camera_preview::app::{CameraPreview, MainLoop, Message};
use camera_preview::backends::camera::types::{CameraBackendType, CameraFacing, CameraFrame};
use camera_preview::backends::camera::{LifecycleOwner, acquire_provider};
use camera_preview::config::Config;
use camera_preview::constants::app_info;
use camera_preview::errors::{AppError, AppResult};
use camera_preview::pipelines::blur::fast_blur;
use chrono::Local;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

/// Load the config from an explicit file or the default location
pub fn load_config(path: Option<&Path>) -> AppResult<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load()),
    }
}

/// Requested facing, or the configured default when none was given
pub fn resolve_facing(config: &Config, front: bool, back: bool) -> CameraFacing {
    match (front, back) {
        (true, _) => CameraFacing::Front,
        (_, true) => CameraFacing::Back,
        _ => config.default_facing,
    }
}

fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Open the camera and perform alternating switches
pub fn run_demo(
    mut config: Config,
    backend: Option<CameraBackendType>,
    facing: CameraFacing,
    switches: u32,
    interval_ms: u64,
    save_overlays: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(backend) = backend {
        config.backend = backend;
    }
    let interval = Duration::from_millis(interval_ms);

    let rt = build_runtime()?;
    rt.block_on(async move {
        let mut main_loop = MainLoop::new(CameraPreview::new(config));
        let owner = LifecycleOwner::new("cli-demo");
        let handle = main_loop.handle();

        handle.open_camera(owner.clone(), facing.is_front());
        main_loop.run_until(|w| w.is_ready()).await?;
        println!(
            "Camera opened: {} ({})",
            main_loop
                .widget()
                .bound_facing()
                .map(|f| f.to_string())
                .unwrap_or_else(|| "unbound".to_string()),
            main_loop.widget().config().backend
        );

        let mut facing = facing;
        for index in 1..=switches {
            // Keep the preview running between switches
            if let Ok(result) =
                tokio::time::timeout(interval, main_loop.run_until(|_| false)).await
            {
                result?;
                break;
            }

            facing = facing.toggled();
            main_loop.dispatch(Message::SwitchCamera {
                owner: owner.clone(),
                facing,
            })?;

            let overlay = main_loop.widget().overlay();
            println!(
                "[{}] Switched to {} camera, overlay visible: {}",
                index,
                facing,
                overlay.is_visible()
            );
            if let (Some(dir), Some(image)) = (save_overlays.as_ref(), overlay.image()) {
                let path = dir.join(format!("overlay_{:02}.png", index));
                let image = image
                    .to_rgba_image()
                    .ok_or_else(|| AppError::from("invalid overlay image"))?;
                save_rgba(&image, &path)?;
                println!("    Saved overlay: {}", path.display());
            }

            let started = Instant::now();
            main_loop.run_until(|w| !w.overlay().is_visible()).await?;
            println!(
                "    Overlay hidden after {} ms",
                started.elapsed().as_millis()
            );
        }

        handle.shutdown();
        main_loop.run_until(|_| false).await?;
        Ok::<(), AppError>(())
    })?;

    Ok(())
}

/// Blur an image file with the transition filter
pub fn blur_image(
    config: &Config,
    input: &Path,
    output: Option<PathBuf>,
    scale: Option<f32>,
    radius: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scale = scale.unwrap_or(config.transition.blur_scale);
    let radius = radius.unwrap_or(config.transition.blur_radius);

    let source = image::open(input)?.to_rgba8();
    println!(
        "Input: {} ({}x{})",
        input.display(),
        source.width(),
        source.height()
    );

    let started = Instant::now();
    let blurred = fast_blur(&CameraFrame::from_rgba_image(source, None), scale, radius);
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "Blur finished");

    let output = output.unwrap_or_else(|| default_blur_output(input));
    let image = blurred
        .to_rgba_image()
        .ok_or("blur produced an invalid image")?;
    save_rgba(&image, &output)?;

    println!(
        "Blurred (scale {}, radius {}): {} ({}x{})",
        scale,
        radius,
        output.display(),
        blurred.width,
        blurred.height
    );
    Ok(())
}

/// Take a still through the session handle
pub fn take_photo(
    config: Config,
    facing: CameraFacing,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = build_runtime()?;
    let frame = rt.block_on(async move {
        let mut main_loop = MainLoop::new(CameraPreview::new(config));
        let owner = LifecycleOwner::new("cli-photo");
        main_loop.handle().open_camera(owner, facing.is_front());
        main_loop.run_until(|w| w.is_ready()).await?;

        let session = main_loop
            .widget()
            .camera_provider()
            .ok_or_else(|| AppError::from(format!("{} camera session missing", facing)))?;
        let frame = session.capture_photo()?;
        main_loop.dispatch(Message::Shutdown)?;
        Ok::<CameraFrame, AppError>(frame)
    })?;

    let image = frame
        .to_rgba_image()
        .ok_or("captured frame is empty")?;
    let path = output.unwrap_or_else(default_photo_path);
    save_rgba(&image, &path)?;
    println!(
        "Photo saved: {} ({}x{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(())
}

/// List the facings a backend offers
pub fn list_cameras(
    mut config: Config,
    backend: Option<CameraBackendType>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(backend) = backend {
        config.backend = backend;
    }
    let backend = config.backend;

    let rt = build_runtime()?;
    let provider = rt.block_on(acquire_provider(config))?;
    let facings = provider.available_facings();

    if facings.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras ({}):", backend);
    for facing in facings {
        println!("  {}", facing);
    }
    Ok(())
}

/// Write the config file, defaults unless `current` is set
pub fn write_config(
    config: &Config,
    path: Option<&Path>,
    current: bool,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => Config::config_path().ok_or("no config directory")?,
    };
    if target.exists() && !force {
        return Err(format!("{} already exists (use --force)", target.display()).into());
    }

    let config = if current {
        config.clone()
    } else {
        Config::default()
    };
    match path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    println!("Config written: {}", target.display());
    Ok(())
}

fn save_rgba(image: &RgbaImage, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image.save(path)?;
    Ok(())
}

fn default_blur_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    input.with_file_name(format!("{}_blurred.png", stem))
}

fn default_photo_path() -> PathBuf {
    let dir = dirs::picture_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(app_info::PICTURES_SUBDIR);
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("photo_{}.png", timestamp))
}
