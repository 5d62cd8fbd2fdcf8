// SPDX-License-Identifier: GPL-3.0-only

//! Live preview surface
//!
//! Holds the last rendered frame of the bound camera. Rebinding detaches and
//! reattaches the surface without dropping what it last showed, so a capture
//! taken right before a switch still has pixels to work with.

use crate::backends::camera::types::{CameraFacing, CameraFrame};
use tracing::trace;

#[derive(Debug, Default)]
pub struct PreviewSurface {
    attached: Option<CameraFacing>,
    mirror_front: bool,
    last_frame: Option<CameraFrame>,
    frames_rendered: u64,
}

impl PreviewSurface {
    pub fn new(mirror_front: bool) -> Self {
        Self {
            mirror_front,
            ..Self::default()
        }
    }

    /// Start accepting frames from `facing`
    pub fn attach(&mut self, facing: CameraFacing) {
        self.attached = Some(facing);
    }

    /// Stop accepting frames; the last frame stays on screen
    pub fn detach(&mut self) {
        self.attached = None;
    }

    pub fn attached_facing(&self) -> Option<CameraFacing> {
        self.attached
    }

    /// Render a frame from the provider
    ///
    /// Frames from a camera other than the attached one are stale leftovers
    /// from before a rebind and are dropped. Returns whether it was shown.
    pub fn render(&mut self, frame: CameraFrame) -> bool {
        let Some(attached) = self.attached else {
            trace!("Surface detached, dropping frame");
            return false;
        };
        if frame.facing.is_some_and(|f| f != attached) {
            trace!(frame_facing = ?frame.facing, attached = %attached, "Dropping stale frame");
            return false;
        }

        let frame = if self.mirror_front && attached.is_front() {
            frame.mirrored()
        } else {
            frame
        };
        self.last_frame = Some(frame);
        self.frames_rendered += 1;
        true
    }

    /// Snapshot of what the surface currently shows
    pub fn current_frame(&self) -> Option<CameraFrame> {
        self.last_frame.clone()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Drop the displayed frame (session shutdown)
    pub fn clear(&mut self) {
        self.attached = None;
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(facing: CameraFacing) -> CameraFrame {
        CameraFrame::new(2, 1, vec![1, 1, 1, 255, 2, 2, 2, 255], Some(facing))
    }

    #[test]
    fn detached_surface_drops_frames() {
        let mut surface = PreviewSurface::new(false);
        assert!(!surface.render(frame(CameraFacing::Back)));
        assert!(surface.current_frame().is_none());
    }

    #[test]
    fn stale_facing_is_dropped() {
        let mut surface = PreviewSurface::new(false);
        surface.attach(CameraFacing::Front);
        assert!(!surface.render(frame(CameraFacing::Back)));
        assert!(surface.render(frame(CameraFacing::Front)));
        assert_eq!(surface.frames_rendered(), 1);
    }

    #[test]
    fn front_frames_are_mirrored_when_enabled() {
        let mut surface = PreviewSurface::new(true);
        surface.attach(CameraFacing::Front);
        surface.render(frame(CameraFacing::Front));
        assert_eq!(&surface.current_frame().unwrap().data[..4], &[2, 2, 2, 255]);

        surface.attach(CameraFacing::Back);
        surface.render(frame(CameraFacing::Back));
        assert_eq!(&surface.current_frame().unwrap().data[..4], &[1, 1, 1, 255]);
    }

    #[test]
    fn detach_keeps_last_frame() {
        let mut surface = PreviewSurface::new(false);
        surface.attach(CameraFacing::Back);
        surface.render(frame(CameraFacing::Back));
        surface.detach();
        assert!(surface.current_frame().is_some());
        surface.clear();
        assert!(surface.current_frame().is_none());
    }
}
