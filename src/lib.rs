// SPDX-License-Identifier: MPL-2.0

//! Camera Preview - live camera preview with front/back switching
//!
//! Switching cameras freezes the current frame behind a blurred still while
//! the preview rebinds, then reveals the new camera.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: Preview widget, switch transition and event loop
//! - [`backends`]: Camera provider abstraction and implementations
//! - [`pipelines`]: Downsample-then-blur filter
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```no_run
//! use camera_preview::app::{CameraPreview, MainLoop};
//! use camera_preview::backends::camera::LifecycleOwner;
//! use camera_preview::Config;
//!
//! # async fn demo() -> camera_preview::errors::AppResult<()> {
//! let mut main_loop = MainLoop::new(CameraPreview::new(Config::default()));
//! let owner = LifecycleOwner::new("main");
//! let handle = main_loop.handle();
//! handle.open_camera(owner.clone(), false);
//! main_loop.run_until(|w| w.is_ready()).await?;
//! handle.switch_camera(owner, true);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipelines;

// Re-export commonly used types
pub use app::{CameraPreview, CameraSwitchTransition, MainLoop, Message};
pub use backends::camera::types::{CameraFacing, CameraFrame};
pub use config::Config;
pub use pipelines::blur::{BlurredFrame, fast_blur};
