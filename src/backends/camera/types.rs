// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Which physical camera a session binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    /// User-facing (selfie) camera
    Front,
    /// World-facing camera
    #[default]
    Back,
}

impl CameraFacing {
    /// Both facings, front first
    pub const ALL: [CameraFacing; 2] = [CameraFacing::Front, CameraFacing::Back];

    /// Map the widget's `is_front` flag to a facing
    pub fn from_is_front(is_front: bool) -> Self {
        if is_front {
            CameraFacing::Front
        } else {
            CameraFacing::Back
        }
    }

    pub fn is_front(&self) -> bool {
        matches!(self, CameraFacing::Front)
    }

    /// The other camera
    pub fn toggled(&self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }
}

impl std::fmt::Display for CameraFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraFacing::Front => write!(f, "front"),
            CameraFacing::Back => write!(f, "back"),
        }
    }
}

/// Camera provider implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraBackendType {
    /// Generated test-pattern frames
    #[default]
    Synthetic,
    /// Still images loaded from disk, one per facing
    Image,
}

impl std::fmt::Display for CameraBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraBackendType::Synthetic => write!(f, "Synthetic"),
            CameraBackendType::Image => write!(f, "Image"),
        }
    }
}

/// A single RGBA8 frame from the camera
///
/// Pixel data is shared and never mutated after creation, so a captured frame
/// stays intact while newer frames replace it on the surface.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA pixels (`width * height * 4` bytes)
    pub data: Arc<[u8]>,
    /// Camera that produced the frame, `None` for substituted frames
    pub facing: Option<CameraFacing>,
    /// Monotonic frame counter from the provider
    pub sequence: u64,
    /// Timestamp when frame was captured
    pub captured_at: Instant,
}

impl CameraFrame {
    pub fn new(width: u32, height: u32, data: Vec<u8>, facing: Option<CameraFacing>) -> Self {
        Self {
            width,
            height,
            data: Arc::from(data),
            facing,
            sequence: 0,
            captured_at: Instant::now(),
        }
    }

    /// Empty frame substituted when the surface has nothing rendered yet
    pub fn blank() -> Self {
        Self::new(0, 0, Vec::new(), None)
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Whether the frame carries no usable pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.data.len() < (self.width as usize) * (self.height as usize) * 4
    }

    /// Copy into an `image` buffer; `None` for empty or truncated frames
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        if self.is_empty() {
            return None;
        }
        let len = (self.width as usize) * (self.height as usize) * 4;
        RgbaImage::from_raw(self.width, self.height, self.data[..len].to_vec())
    }

    pub fn from_rgba_image(image: RgbaImage, facing: Option<CameraFacing>) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw(), facing)
    }

    /// Horizontally flipped copy (selfie-style preview)
    pub fn mirrored(&self) -> Self {
        match self.to_rgba_image() {
            Some(image) => {
                let flipped = image::imageops::flip_horizontal(&image);
                Self {
                    data: Arc::from(flipped.into_raw()),
                    ..self.clone()
                }
            }
            None => self.clone(),
        }
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Backend is not available on this system
    NotAvailable(String),
    /// Camera device not found
    DeviceNotFound(String),
    /// Bind requested for an owner whose lifecycle already ended
    LifecycleEnded(String),
    /// Still capture failed
    CaptureFailed(String),
    /// General I/O error
    IoError(String),
    /// Other errors
    Other(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::NotAvailable(msg) => write!(f, "Backend not available: {}", msg),
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::LifecycleEnded(msg) => write!(f, "Lifecycle ended: {}", msg),
            BackendError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            BackendError::IoError(msg) => write!(f, "I/O error: {}", msg),
            BackendError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}
