// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! The preview never talks to a device directly. Device acquisition and
//! binding live behind the [`CameraProvider`] trait, and the
//! [`CameraSession`] wraps a provider with the open/rebind semantics the
//! preview relies on.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  CameraPreview      │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   CameraSession     │  ← unbind-all then bind, still capture
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraProvider Trait│  ← Common interface
//! └──────────┬──────────┘
//!            │
//!       ┌────┴─────┐
//!       ▼          ▼
//!  ┌─────────┐ ┌───────┐
//!  │Synthetic│ │ Image │
//!  └─────────┘ └───────┘
//! ```

pub mod image_source;
pub mod lifecycle;
pub mod session;
pub mod synthetic;
pub mod types;

pub use lifecycle::{BindingRegistry, LifecycleOwner};
pub use session::CameraSession;
pub use types::*;

use crate::config::Config;
use tracing::info;

/// Camera provider trait
///
/// Providers own device access and the preview binding. A provider accepts at
/// most one live binding; callers unbind before binding again.
pub trait CameraProvider: Send {
    /// Get the backend type identifier
    fn backend_type(&self) -> CameraBackendType;

    /// Facings this provider has a device for
    fn available_facings(&self) -> Vec<CameraFacing>;

    /// Check whether a device exists for `facing`
    fn has_camera(&self, facing: CameraFacing) -> bool {
        self.available_facings().contains(&facing)
    }

    /// Release every binding regardless of owner
    fn unbind_all(&mut self);

    /// Release the bindings held by one owner
    fn unbind_owner(&mut self, owner: &LifecycleOwner);

    /// Bind the preview to `facing` for the lifetime of `owner`
    ///
    /// # Returns
    /// * `Ok(())` - Preview bound
    /// * `Err(BackendError::DeviceNotFound)` - No camera with that facing
    /// * `Err(BackendError)` - Already bound, or the owner has ended
    fn bind_to_lifecycle(
        &mut self,
        owner: &LifecycleOwner,
        facing: CameraFacing,
    ) -> BackendResult<()>;

    /// Facing of the live binding, if any
    fn bound_facing(&self) -> Option<CameraFacing>;

    /// Number of live bindings (0 or 1)
    fn binding_count(&self) -> usize;

    /// Produce the next preview frame from the bound camera
    ///
    /// Returns `None` when nothing is bound.
    fn next_frame(&mut self) -> Option<CameraFrame>;

    /// Most recent preview frame produced since the last bind
    fn latest_frame(&self) -> Option<CameraFrame>;

    /// Capture a still frame from the bound camera
    fn capture_photo(&self) -> BackendResult<CameraFrame>;
}

/// Acquire a provider for the configured backend
///
/// Acquisition is asynchronous: the preview posts the result back to its
/// event loop once the future resolves.
pub async fn acquire_provider(config: Config) -> BackendResult<Box<dyn CameraProvider>> {
    info!(backend = %config.backend, "Acquiring camera provider");

    match config.backend {
        CameraBackendType::Synthetic => {
            tokio::task::yield_now().await;
            let settings = &config.synthetic;
            let provider = synthetic::SyntheticProvider::new(
                settings.width,
                settings.height,
                settings.facings.clone(),
            )?;
            Ok(Box::new(provider))
        }
        CameraBackendType::Image => {
            let sources = config.image_sources.clone();
            let provider = tokio::task::spawn_blocking(move || {
                image_source::ImageProvider::load(sources.front.as_deref(), sources.back.as_deref())
            })
            .await
            .map_err(|e| BackendError::Other(format!("provider task failed: {}", e)))??;
            Ok(Box::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn acquires_synthetic_provider_by_default() {
        let provider = acquire_provider(Config::default()).await.unwrap();
        assert_eq!(provider.backend_type(), CameraBackendType::Synthetic);
        assert!(provider.has_camera(CameraFacing::Front));
        assert!(provider.has_camera(CameraFacing::Back));
        assert_eq!(provider.binding_count(), 0);
    }

    #[tokio::test]
    async fn image_backend_without_sources_is_unavailable() {
        let config = Config {
            backend: CameraBackendType::Image,
            ..Config::default()
        };
        assert!(matches!(
            acquire_provider(config).await,
            Err(BackendError::NotAvailable(_))
        ));
    }
}
