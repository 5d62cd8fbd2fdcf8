// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic camera provider
//!
//! Generates deterministic test-pattern frames, a different pattern per
//! facing, so the preview can run without camera hardware.

use super::CameraProvider;
use super::lifecycle::{BindingRegistry, LifecycleOwner};
use super::types::*;
use tracing::{debug, info};

/// Provider producing generated frames
#[derive(Debug)]
pub struct SyntheticProvider {
    width: u32,
    height: u32,
    facings: Vec<CameraFacing>,
    bindings: BindingRegistry,
    sequence: u64,
    latest: Option<CameraFrame>,
}

impl SyntheticProvider {
    /// Create a provider offering `facings` at `width`x`height`
    pub fn new(width: u32, height: u32, facings: Vec<CameraFacing>) -> BackendResult<Self> {
        if width == 0 || height == 0 {
            return Err(BackendError::NotAvailable(format!(
                "invalid synthetic resolution {}x{}",
                width, height
            )));
        }
        info!(width, height, ?facings, "Created synthetic camera provider");
        Ok(Self {
            width,
            height,
            facings,
            bindings: BindingRegistry::new(),
            sequence: 0,
            latest: None,
        })
    }

    fn render(&self, facing: CameraFacing, sequence: u64) -> CameraFrame {
        let frame = render_pattern(self.width, self.height, facing, sequence);
        frame.with_sequence(sequence)
    }
}

/// Deterministic test pattern
///
/// Front: horizontal red/green gradient. Back: vertical blue gradient with an
/// 8px checker. Both drift by one step per frame so consecutive frames differ.
pub fn render_pattern(width: u32, height: u32, facing: CameraFacing, sequence: u64) -> CameraFrame {
    let mut data = Vec::with_capacity((width as usize) * (height as usize) * 4);
    let shift = (sequence % 256) as u32;

    for y in 0..height {
        for x in 0..width {
            let pixel = match facing {
                CameraFacing::Front => {
                    let r = ((x * 255 / width.max(1)) + shift) % 256;
                    let g = (y * 255 / height.max(1)) % 256;
                    [r as u8, g as u8, 96, 255]
                }
                CameraFacing::Back => {
                    let b = ((y * 255 / height.max(1)) + shift) % 256;
                    let checker = if ((x / 8) + (y / 8)) % 2 == 0 { 40 } else { 200 };
                    [checker, checker, b as u8, 255]
                }
            };
            data.extend_from_slice(&pixel);
        }
    }

    CameraFrame::new(width, height, data, Some(facing))
}

impl CameraProvider for SyntheticProvider {
    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::Synthetic
    }

    fn available_facings(&self) -> Vec<CameraFacing> {
        self.facings.clone()
    }

    fn unbind_all(&mut self) {
        self.bindings.clear();
        self.latest = None;
    }

    fn unbind_owner(&mut self, owner: &LifecycleOwner) {
        self.bindings.deregister(owner);
        if self.bindings.is_empty() {
            self.latest = None;
        }
    }

    fn bind_to_lifecycle(
        &mut self,
        owner: &LifecycleOwner,
        facing: CameraFacing,
    ) -> BackendResult<()> {
        if !self.has_camera(facing) {
            return Err(BackendError::DeviceNotFound(format!(
                "no {} camera on synthetic provider",
                facing
            )));
        }
        self.bindings.register(owner, facing)?;
        debug!(facing = %facing, "Synthetic camera bound");
        Ok(())
    }

    fn bound_facing(&self) -> Option<CameraFacing> {
        self.bindings.active_facing()
    }

    fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    fn next_frame(&mut self) -> Option<CameraFrame> {
        let facing = self.bound_facing()?;
        self.sequence += 1;
        let frame = self.render(facing, self.sequence);
        self.latest = Some(frame.clone());
        Some(frame)
    }

    fn latest_frame(&self) -> Option<CameraFrame> {
        self.latest.clone()
    }

    fn capture_photo(&self) -> BackendResult<CameraFrame> {
        let facing = self
            .bound_facing()
            .ok_or_else(|| BackendError::CaptureFailed("no camera bound".to_string()))?;
        Ok(self.render(facing, self.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SyntheticProvider {
        SyntheticProvider::new(32, 24, CameraFacing::ALL.to_vec()).unwrap()
    }

    #[test]
    fn zero_resolution_is_rejected() {
        assert!(SyntheticProvider::new(0, 10, vec![CameraFacing::Back]).is_err());
    }

    #[test]
    fn no_frames_until_bound() {
        let mut provider = provider();
        assert!(provider.next_frame().is_none());
        assert!(provider.capture_photo().is_err());
    }

    #[test]
    fn frames_follow_bound_facing() {
        let owner = LifecycleOwner::new("test");
        let mut provider = provider();
        provider.bind_to_lifecycle(&owner, CameraFacing::Front).unwrap();
        let frame = provider.next_frame().unwrap();
        assert_eq!(frame.facing, Some(CameraFacing::Front));
        assert_eq!((frame.width, frame.height), (32, 24));
        assert_eq!(frame.sequence, 1);
        assert_eq!(provider.latest_frame().unwrap().sequence, 1);
    }

    #[test]
    fn missing_facing_fails_to_bind() {
        let owner = LifecycleOwner::new("test");
        let mut provider = SyntheticProvider::new(8, 8, vec![CameraFacing::Back]).unwrap();
        assert!(matches!(
            provider.bind_to_lifecycle(&owner, CameraFacing::Front),
            Err(BackendError::DeviceNotFound(_))
        ));
        assert_eq!(provider.binding_count(), 0);
    }

    #[test]
    fn patterns_differ_per_facing() {
        let front = render_pattern(16, 16, CameraFacing::Front, 0);
        let back = render_pattern(16, 16, CameraFacing::Back, 0);
        assert_ne!(&front.data[..], &back.data[..]);
    }

    #[test]
    fn unbind_all_clears_latest_frame() {
        let owner = LifecycleOwner::new("test");
        let mut provider = provider();
        provider.bind_to_lifecycle(&owner, CameraFacing::Back).unwrap();
        provider.next_frame();
        provider.unbind_all();
        assert!(provider.latest_frame().is_none());
        assert_eq!(provider.bound_facing(), None);
    }
}
