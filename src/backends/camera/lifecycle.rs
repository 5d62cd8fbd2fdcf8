// SPDX-License-Identifier: GPL-3.0-only

//! Lifecycle owners for camera bindings
//!
//! A binding is scoped to the owner it was made for. Registration happens when
//! the provider binds, deregistration either when the owner ends (checked on
//! the next bind) or explicitly through `CameraSession::release`.

use super::types::{BackendError, BackendResult, CameraFacing};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use uuid::Uuid;

/// Handle identifying the scope a camera binding belongs to
///
/// Clones share the same alive flag, so ending any clone ends the owner.
#[derive(Debug, Clone)]
pub struct LifecycleOwner {
    id: Uuid,
    name: String,
    alive: Arc<AtomicBool>,
}

impl LifecycleOwner {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Mark the owner as ended; its bindings must not be renewed
    pub fn end(&self) {
        self.alive.store(false, Ordering::Release);
    }
}

impl PartialEq for LifecycleOwner {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LifecycleOwner {}

impl std::fmt::Display for LifecycleOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A preview binding registered for one owner
#[derive(Debug, Clone)]
pub struct Binding {
    pub owner: LifecycleOwner,
    pub facing: CameraFacing,
}

/// Bookkeeping of which owner holds the preview binding
///
/// Only one binding may be live at a time. Binding again without unbinding
/// first is rejected, the same way platform camera frameworks refuse to bind
/// one preview to two cameras.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding for `owner`
    pub fn register(&mut self, owner: &LifecycleOwner, facing: CameraFacing) -> BackendResult<()> {
        self.prune();
        if !owner.is_active() {
            return Err(BackendError::LifecycleEnded(owner.to_string()));
        }
        if let Some(existing) = self.bindings.first() {
            return Err(BackendError::Other(format!(
                "preview already bound to {} camera for {}",
                existing.facing, existing.owner
            )));
        }
        debug!(owner = %owner, facing = %facing, "Registered binding");
        self.bindings.push(Binding {
            owner: owner.clone(),
            facing,
        });
        Ok(())
    }

    /// Drop every binding held by `owner`
    pub fn deregister(&mut self, owner: &LifecycleOwner) {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.owner != *owner);
        if self.bindings.len() != before {
            debug!(owner = %owner, "Deregistered bindings");
        }
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Facing of the live binding, ignoring owners that have ended
    pub fn active_facing(&self) -> Option<CameraFacing> {
        self.bindings
            .iter()
            .find(|b| b.owner.is_active())
            .map(|b| b.facing)
    }

    /// Number of bindings whose owner is still alive
    pub fn len(&self) -> usize {
        self.bindings.iter().filter(|b| b.owner.is_active()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&mut self) {
        self.bindings.retain(|b| b.owner.is_active());
    }
}
