// SPDX-License-Identifier: GPL-3.0-only

//! Preview widget state and messages

use crate::app::overlay::OverlayImage;
use crate::app::surface::PreviewSurface;
use crate::app::transition::CameraSwitchTransition;
use crate::backends::camera::types::{BackendError, CameraFacing, CameraFrame};
use crate::backends::camera::{CameraProvider, CameraSession, LifecycleOwner};
use crate::config::Config;
use std::time::Duration;

/// Camera preview widget
///
/// A container holding the live preview surface with the transition overlay
/// stacked on top. Each instance owns its session exclusively; all fields are
/// only touched from the event loop that drives [`CameraPreview::update`].
pub struct CameraPreview {
    pub(crate) config: Config,
    pub(crate) surface: PreviewSurface,
    pub(crate) overlay: OverlayImage,
    pub(crate) transition: CameraSwitchTransition,
    /// `None` until the provider has been acquired
    pub(crate) session: Option<CameraSession>,
    /// Owner and facing requested by `open_camera` while acquisition runs
    pub(crate) pending_open: Option<(LifecycleOwner, CameraFacing)>,
    /// Whether a preview tick is already scheduled
    pub(crate) preview_ticking: bool,
}

/// Acquired provider, carried back to the event loop
pub struct ProviderHandle(pub Box<dyn CameraProvider>);

impl std::fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ProviderHandle")
            .field(&self.0.backend_type())
            .finish()
    }
}

/// Messages handled by [`CameraPreview::update`]
#[derive(Debug)]
pub enum Message {
    /// Acquire the provider and bind the preview
    OpenCamera {
        owner: LifecycleOwner,
        facing: CameraFacing,
    },
    /// Provider acquisition finished
    ProviderReady(Result<ProviderHandle, BackendError>),
    /// Switch to another camera with the blur transition
    SwitchCamera {
        owner: LifecycleOwner,
        facing: CameraFacing,
    },
    /// Hide the transition overlay (posted after the hide delay)
    HideOverlay,
    /// Pull the next frame from the bound camera
    PreviewTick,
    /// A live frame delivered from outside the loop
    FrameReceived(CameraFrame),
    /// The owner's lifecycle ended; drop its bindings
    ReleaseOwner(LifecycleOwner),
    /// Unbind everything and stop the event loop
    Shutdown,
}

impl CameraPreview {
    pub fn new(config: Config) -> Self {
        let transition = CameraSwitchTransition::new(&config.transition);
        Self {
            surface: PreviewSurface::new(config.mirror_front_preview),
            overlay: OverlayImage::new(),
            transition,
            session: None,
            pending_open: None,
            preview_ticking: false,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    pub fn overlay(&self) -> &OverlayImage {
        &self.overlay
    }

    pub fn transition(&self) -> &CameraSwitchTransition {
        &self.transition
    }

    /// Underlying session, for still capture and other extensions
    ///
    /// `None` until the provider has been acquired.
    pub fn camera_provider(&self) -> Option<&CameraSession> {
        self.session.as_ref()
    }

    /// Whether a session exists (switches are no-ops until it does)
    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Camera the preview is bound to
    pub fn bound_facing(&self) -> Option<CameraFacing> {
        self.session.as_ref().and_then(|s| s.bound_facing())
    }

    pub(crate) fn frame_interval(&self) -> Option<Duration> {
        self.config.preview_frame_interval()
    }
}

impl std::fmt::Debug for CameraPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraPreview")
            .field("session", &self.session)
            .field("surface", &self.surface.attached_facing())
            .field("overlay_visible", &self.overlay.is_visible())
            .finish()
    }
}
