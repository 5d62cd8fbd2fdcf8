// SPDX-License-Identifier: GPL-3.0-only

//! Camera switch transition
//!
//! Freezes the current preview behind a blurred still while the session
//! rebinds to the other camera:
//!
//! 1. capture what the surface shows (blank if nothing rendered yet)
//! 2. downsample-then-blur it
//! 3. show the result on the overlay
//! 4. rebind the session (unbind-all, then bind the new facing)
//! 5. hand back the delay after which the overlay must be hidden
//!
//! The transition keeps no state between calls. Each switch yields its own
//! hide deadline; overlapping switches simply replace the overlay image.

use crate::app::overlay::OverlayImage;
use crate::app::surface::PreviewSurface;
use crate::backends::camera::lifecycle::LifecycleOwner;
use crate::backends::camera::session::CameraSession;
use crate::backends::camera::types::{CameraFacing, CameraFrame};
use crate::config::TransitionSettings;
use crate::errors::CameraError;
use crate::pipelines::blur::fast_blur;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSwitchTransition {
    blur_scale: f32,
    blur_radius: u32,
    hide_delay: Duration,
}

impl Default for CameraSwitchTransition {
    fn default() -> Self {
        Self::new(&TransitionSettings::default())
    }
}

impl CameraSwitchTransition {
    pub fn new(settings: &TransitionSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            blur_scale: settings.blur_scale,
            blur_radius: settings.blur_radius,
            hide_delay: settings.hide_delay(),
        }
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    pub fn blur_scale(&self) -> f32 {
        self.blur_scale
    }

    pub fn blur_radius(&self) -> u32 {
        self.blur_radius
    }

    /// Run the switch
    ///
    /// # Returns
    /// * `Ok(delay)` - Overlay shown; hide it after `delay`
    /// * `Err(CameraError::SessionNotReady)` - No session yet, nothing touched
    /// * `Err(CameraError)` - Rebind failed (fatal for the host)
    pub fn run(
        &self,
        session: Option<&mut CameraSession>,
        surface: &mut PreviewSurface,
        overlay: &mut OverlayImage,
        owner: &LifecycleOwner,
        facing: CameraFacing,
    ) -> Result<Duration, CameraError> {
        let Some(session) = session else {
            return Err(CameraError::SessionNotReady);
        };

        let captured = surface.current_frame().unwrap_or_else(|| {
            debug!("No frame rendered yet, blurring a blank frame");
            CameraFrame::blank()
        });

        let blurred = fast_blur(&captured, self.blur_scale, self.blur_radius);
        overlay.show(blurred);

        surface.detach();
        session.open(owner, facing)?;
        surface.attach(facing);

        info!(
            facing = %facing,
            hide_after_ms = self.hide_delay.as_millis() as u64,
            "Camera switch transition started"
        );
        Ok(self.hide_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::synthetic::SyntheticProvider;
    use crate::constants::transition;

    fn session(facings: Vec<CameraFacing>) -> CameraSession {
        CameraSession::new(Box::new(SyntheticProvider::new(64, 48, facings).unwrap()))
    }

    #[test]
    fn defaults_match_transition_constants() {
        let t = CameraSwitchTransition::default();
        assert_eq!(t.blur_scale(), transition::BLUR_SCALE);
        assert_eq!(t.blur_radius(), transition::BLUR_RADIUS);
        assert_eq!(t.hide_delay(), transition::OVERLAY_HIDE_DELAY);
    }

    #[test]
    fn without_session_nothing_changes() {
        let owner = LifecycleOwner::new("test");
        let mut surface = PreviewSurface::new(false);
        let mut overlay = OverlayImage::new();
        let result = CameraSwitchTransition::default().run(
            None,
            &mut surface,
            &mut overlay,
            &owner,
            CameraFacing::Front,
        );
        assert_eq!(result, Err(CameraError::SessionNotReady));
        assert!(!overlay.is_visible());
        assert_eq!(overlay.shown_count(), 0);
        assert_eq!(surface.attached_facing(), None);
    }

    #[test]
    fn switch_blurs_current_frame_and_rebinds() {
        let owner = LifecycleOwner::new("test");
        let mut session = session(CameraFacing::ALL.to_vec());
        let mut surface = PreviewSurface::new(false);
        let mut overlay = OverlayImage::new();

        session.open(&owner, CameraFacing::Back).unwrap();
        surface.attach(CameraFacing::Back);
        let frame = session.next_frame().unwrap();
        surface.render(frame);

        let delay = CameraSwitchTransition::default()
            .run(
                Some(&mut session),
                &mut surface,
                &mut overlay,
                &owner,
                CameraFacing::Front,
            )
            .unwrap();

        assert_eq!(delay, Duration::from_millis(300));
        assert!(overlay.is_visible());
        let image = overlay.image().unwrap();
        assert_eq!((image.width, image.height), (16, 12));
        assert_eq!(session.bound_facing(), Some(CameraFacing::Front));
        assert_eq!(session.binding_count(), 1);
        assert_eq!(surface.attached_facing(), Some(CameraFacing::Front));
    }

    #[test]
    fn nothing_rendered_uses_blank_frame() {
        let owner = LifecycleOwner::new("test");
        let mut session = session(CameraFacing::ALL.to_vec());
        let mut surface = PreviewSurface::new(false);
        let mut overlay = OverlayImage::new();
        session.open(&owner, CameraFacing::Back).unwrap();

        CameraSwitchTransition::default()
            .run(
                Some(&mut session),
                &mut surface,
                &mut overlay,
                &owner,
                CameraFacing::Front,
            )
            .unwrap();

        let image = overlay.image().unwrap();
        assert_eq!((image.width, image.height), (1, 1));
    }

    #[test]
    fn failed_rebind_is_reported() {
        let owner = LifecycleOwner::new("test");
        let mut session = session(vec![CameraFacing::Back]);
        let mut surface = PreviewSurface::new(false);
        let mut overlay = OverlayImage::new();
        session.open(&owner, CameraFacing::Back).unwrap();

        let result = CameraSwitchTransition::default().run(
            Some(&mut session),
            &mut surface,
            &mut overlay,
            &owner,
            CameraFacing::Front,
        );
        assert!(matches!(result, Err(CameraError::DeviceNotFound(_))));
        assert!(result.unwrap_err().is_fatal());
    }
}
