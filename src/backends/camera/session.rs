// SPDX-License-Identifier: GPL-3.0-only

//! Camera session
//!
//! The session owns the acquired provider for one preview instance. Opening
//! always unbinds everything first, so reopening with a new facing replaces
//! the binding instead of stacking a second one.

use super::CameraProvider;
use super::lifecycle::LifecycleOwner;
use super::types::*;
use tracing::info;

/// Live binding between a provider and the preview
pub struct CameraSession {
    provider: Box<dyn CameraProvider>,
    /// Number of successful binds, for diagnostics
    bind_generation: u64,
}

impl CameraSession {
    pub fn new(provider: Box<dyn CameraProvider>) -> Self {
        info!(backend = %provider.backend_type(), "Creating camera session");
        Self {
            provider,
            bind_generation: 0,
        }
    }

    /// Get the backend type
    pub fn backend_type(&self) -> CameraBackendType {
        self.provider.backend_type()
    }

    /// Facings the provider has devices for
    pub fn available_facings(&self) -> Vec<CameraFacing> {
        self.provider.available_facings()
    }

    /// Bind the preview to `facing`, replacing any existing binding
    pub fn open(&mut self, owner: &LifecycleOwner, facing: CameraFacing) -> BackendResult<()> {
        info!(owner = %owner, facing = %facing, "Binding camera preview");

        self.provider.unbind_all();
        self.provider.bind_to_lifecycle(owner, facing)?;
        self.bind_generation += 1;
        Ok(())
    }

    /// Deregister the bindings of an owner whose lifecycle ended
    pub fn release(&mut self, owner: &LifecycleOwner) {
        info!(owner = %owner, "Releasing camera bindings");
        self.provider.unbind_owner(owner);
    }

    /// Unbind everything (session shutdown)
    pub fn unbind_all(&mut self) {
        self.provider.unbind_all();
    }

    pub fn bound_facing(&self) -> Option<CameraFacing> {
        self.provider.bound_facing()
    }

    pub fn binding_count(&self) -> usize {
        self.provider.binding_count()
    }

    pub fn bind_generation(&self) -> u64 {
        self.bind_generation
    }

    /// Most recent frame produced by the bound camera
    pub fn current_frame(&self) -> Option<CameraFrame> {
        self.provider.latest_frame()
    }

    /// Pull the next live frame from the bound camera
    pub fn next_frame(&mut self) -> Option<CameraFrame> {
        self.provider.next_frame()
    }

    /// Capture a still from the bound camera
    pub fn capture_photo(&self) -> BackendResult<CameraFrame> {
        self.provider.capture_photo()
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("backend_type", &self.provider.backend_type())
            .field("bound_facing", &self.provider.bound_facing())
            .field("bind_generation", &self.bind_generation)
            .finish()
    }
}
