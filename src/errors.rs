// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera preview

use crate::backends::camera::types::BackendError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors (including image encode/decode)
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// Switch requested before the camera provider was acquired
    SessionNotReady,
    /// Provider failed to bind the preview to a device
    BindingFailed(String),
    /// Provider could not be acquired at all
    ProviderUnavailable(String),
    /// No device exists for the requested facing
    DeviceNotFound(String),
    /// Still capture failed
    CaptureFailed(String),
}

impl CameraError {
    /// Whether this error must terminate the host event loop
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CameraError::SessionNotReady)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::SessionNotReady => write!(f, "Camera session not ready"),
            CameraError::BindingFailed(msg) => write!(f, "Binding failed: {}", msg),
            CameraError::ProviderUnavailable(msg) => {
                write!(f, "Camera provider unavailable: {}", msg)
            }
            CameraError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            CameraError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<BackendError> for CameraError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotAvailable(msg) => CameraError::ProviderUnavailable(msg),
            BackendError::DeviceNotFound(msg) => CameraError::DeviceNotFound(msg),
            BackendError::LifecycleEnded(msg) => {
                CameraError::BindingFailed(format!("lifecycle ended: {}", msg))
            }
            BackendError::CaptureFailed(msg) => CameraError::CaptureFailed(msg),
            BackendError::IoError(msg) | BackendError::Other(msg) => {
                CameraError::BindingFailed(msg)
            }
        }
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Camera(err.into())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
