// SPDX-License-Identifier: MPL-2.0

//! Camera preview widget
//!
//! A container stacking a blurred-still overlay on top of the live preview
//! surface, driven by a single-threaded message loop.
//!
//! # Architecture
//!
//! - `state`: Widget state and messages (CameraPreview, Message)
//! - `surface`: Live preview surface
//! - `overlay`: Static image layer shown during camera switches
//! - `transition`: Camera switch transition (capture, blur, rebind)
//! - `handlers`: Message handlers
//! - `update`: Message dispatch
//! - `task`: Deferred follow-up work
//! - `runtime`: Event loop

mod handlers;
pub mod overlay;
pub mod runtime;
mod state;
pub mod surface;
pub mod task;
pub mod transition;
mod update;

pub use overlay::OverlayImage;
pub use runtime::{LoopHandle, MainLoop};
pub use state::{CameraPreview, Message, ProviderHandle};
pub use surface::PreviewSurface;
pub use task::Task;
pub use transition::CameraSwitchTransition;
