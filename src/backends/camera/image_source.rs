// SPDX-License-Identifier: GPL-3.0-only

//! Still-image camera provider
//!
//! Each facing is backed by an image file; every preview frame is that image.

use super::CameraProvider;
use super::lifecycle::{BindingRegistry, LifecycleOwner};
use super::types::*;
use image::RgbaImage;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Provider serving still images per facing
#[derive(Debug)]
pub struct ImageProvider {
    images: HashMap<CameraFacing, RgbaImage>,
    bindings: BindingRegistry,
    sequence: u64,
    latest: Option<CameraFrame>,
}

impl ImageProvider {
    /// Load the images for each facing; at least one must be given
    pub fn load(front: Option<&Path>, back: Option<&Path>) -> BackendResult<Self> {
        let mut images = HashMap::new();

        for (facing, path) in [(CameraFacing::Front, front), (CameraFacing::Back, back)] {
            let Some(path) = path else {
                continue;
            };
            let image = image::open(path).map_err(|e| {
                warn!(path = %path.display(), error = %e, "Failed to load camera image");
                BackendError::IoError(format!("{}: {}", path.display(), e))
            })?;
            let image = image.to_rgba8();
            info!(
                facing = %facing,
                path = %path.display(),
                width = image.width(),
                height = image.height(),
                "Loaded camera image"
            );
            images.insert(facing, image);
        }

        if images.is_empty() {
            return Err(BackendError::NotAvailable(
                "no image configured for either facing".to_string(),
            ));
        }

        Ok(Self::from_images(images))
    }

    /// Build from already decoded images
    pub fn from_images(images: HashMap<CameraFacing, RgbaImage>) -> Self {
        Self {
            images,
            bindings: BindingRegistry::new(),
            sequence: 0,
            latest: None,
        }
    }

    fn frame_for(&self, facing: CameraFacing, sequence: u64) -> Option<CameraFrame> {
        self.images.get(&facing).map(|image| {
            CameraFrame::from_rgba_image(image.clone(), Some(facing)).with_sequence(sequence)
        })
    }
}

impl CameraProvider for ImageProvider {
    fn backend_type(&self) -> CameraBackendType {
        CameraBackendType::Image
    }

    fn available_facings(&self) -> Vec<CameraFacing> {
        CameraFacing::ALL
            .into_iter()
            .filter(|f| self.images.contains_key(f))
            .collect()
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
        if !self.images.contains_key(&facing) {
            return Err(BackendError::DeviceNotFound(format!(
                "no image for {} camera",
                facing
            )));
        }
        self.bindings.register(owner, facing)?;
        debug!(facing = %facing, "Image camera bound");
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
        let frame = self.frame_for(facing, self.sequence)?;
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
        self.frame_for(facing, self.sequence)
            .ok_or_else(|| BackendError::CaptureFailed(format!("no image for {}", facing)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn loads_only_configured_facings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("back.png");
        RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let mut provider = ImageProvider::load(None, Some(&path)).unwrap();
        assert_eq!(provider.available_facings(), vec![CameraFacing::Back]);

        let owner = LifecycleOwner::new("test");
        assert!(provider.bind_to_lifecycle(&owner, CameraFacing::Front).is_err());
        provider.bind_to_lifecycle(&owner, CameraFacing::Back).unwrap();

        let frame = provider.next_frame().unwrap();
        assert_eq!((frame.width, frame.height), (4, 3));
        assert_eq!(&frame.data[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        assert!(matches!(
            ImageProvider::load(Some(&path), None),
            Err(BackendError::IoError(_))
        ));
    }

    #[test]
    fn nothing_configured_is_unavailable() {
        assert!(matches!(
            ImageProvider::load(None, None),
            Err(BackendError::NotAvailable(_))
        ));
    }
}
