// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles opening the camera, provider acquisition, switching with the blur
//! transition, live frame delivery and lifecycle release.

use crate::app::state::{CameraPreview, Message, ProviderHandle};
use crate::app::task::Task;
use crate::backends::camera::types::{BackendError, CameraFacing, CameraFrame};
use crate::backends::camera::{CameraSession, LifecycleOwner, acquire_provider};
use crate::errors::{AppError, AppResult};
use tracing::{debug, error, info};

impl CameraPreview {
    // =========================================================================
    // Public widget operations
    // =========================================================================

    /// Initialize and bind the session for `owner`
    ///
    /// Provider acquisition runs asynchronously; the returned task resolves to
    /// [`Message::ProviderReady`]. Once a session exists this rebinds directly.
    pub fn open_camera(
        &mut self,
        owner: LifecycleOwner,
        is_front: bool,
    ) -> AppResult<Task<Message>> {
        let facing = CameraFacing::from_is_front(is_front);
        info!(owner = %owner, facing = %facing, "Opening camera");

        if let Some(session) = self.session.as_mut() {
            self.surface.detach();
            session.open(&owner, facing).map_err(|e| {
                error!(error = %e, "Failed to bind camera preview");
                AppError::from(e)
            })?;
            self.surface.attach(facing);
            debug!(generation = session.bind_generation(), "Camera preview rebound");
            return Ok(self.schedule_preview_tick());
        }

        let acquiring = self.pending_open.is_some();
        self.pending_open = Some((owner, facing));
        if acquiring {
            debug!("Provider acquisition already running, updating requested facing");
            return Ok(Task::none());
        }

        Ok(Task::perform(acquire_provider(self.config.clone()), |result| {
            Message::ProviderReady(result.map(ProviderHandle))
        }))
    }

    /// Switch cameras with the blurred freeze-frame transition
    ///
    /// A no-op until the session exists. A failed rebind is returned as a
    /// fatal error.
    pub fn switch_camera(
        &mut self,
        owner: LifecycleOwner,
        is_front: bool,
    ) -> AppResult<Task<Message>> {
        let facing = CameraFacing::from_is_front(is_front);
        info!(owner = %owner, facing = %facing, "Received SwitchCamera");

        match self.transition.run(
            self.session.as_mut(),
            &mut self.surface,
            &mut self.overlay,
            &owner,
            facing,
        ) {
            Ok(delay) => Ok(Task::batch([
                Task::delayed(delay, Message::HideOverlay),
                self.schedule_preview_tick(),
            ])),
            Err(e) if !e.is_fatal() => {
                debug!(error = %e, "Ignoring switch");
                Ok(Task::none())
            }
            Err(e) => {
                error!(error = %e, facing = %facing, "Camera switch failed");
                Err(e.into())
            }
        }
    }

    /// Deliver a live frame to the preview surface
    pub fn frame_received(&mut self, frame: CameraFrame) -> bool {
        self.surface.render(frame)
    }

    /// Deregister the bindings of an owner whose lifecycle ended
    pub fn release(&mut self, owner: &LifecycleOwner) {
        owner.end();
        if self
            .pending_open
            .as_ref()
            .is_some_and(|(pending, _)| pending == owner)
        {
            self.pending_open = None;
        }
        if let Some(session) = self.session.as_mut() {
            session.release(owner);
            if session.bound_facing().is_none() {
                self.surface.detach();
            }
        }
    }

    // =========================================================================
    // Message handlers
    // =========================================================================

    pub(crate) fn handle_provider_ready(
        &mut self,
        result: Result<ProviderHandle, BackendError>,
    ) -> AppResult<Task<Message>> {
        let ProviderHandle(provider) = result.map_err(|e| {
            error!(error = %e, "Failed to acquire camera provider");
            AppError::from(e)
        })?;

        let mut session = CameraSession::new(provider);

        let Some((owner, facing)) = self.pending_open.take() else {
            info!("Provider ready but open was withdrawn, keeping session unbound");
            self.session = Some(session);
            return Ok(Task::none());
        };

        session.open(&owner, facing).map_err(|e| {
            error!(error = %e, facing = %facing, "Failed to bind camera preview");
            AppError::from(e)
        })?;
        self.surface.attach(facing);
        info!(
            facing = %facing,
            generation = session.bind_generation(),
            "Camera session ready"
        );
        self.session = Some(session);

        Ok(self.schedule_preview_tick())
    }

    pub(crate) fn handle_hide_overlay(&mut self) -> Task<Message> {
        debug!("Hiding transition overlay");
        self.overlay.hide();
        Task::none()
    }

    pub(crate) fn handle_preview_tick(&mut self) -> Task<Message> {
        self.preview_ticking = false;
        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };
        if let Some(frame) = session.next_frame() {
            self.surface.render(frame);
        }
        self.schedule_preview_tick()
    }

    pub(crate) fn handle_shutdown(&mut self) -> Task<Message> {
        info!("Shutting down camera preview");
        if let Some(mut session) = self.session.take() {
            session.unbind_all();
        }
        self.pending_open = None;
        self.surface.clear();
        self.overlay.hide();
        Task::none()
    }

    /// Schedule the next live frame pull if pumping is enabled and idle
    fn schedule_preview_tick(&mut self) -> Task<Message> {
        if self.preview_ticking || self.bound_facing().is_none() {
            return Task::none();
        }
        let Some(interval) = self.frame_interval() else {
            return Task::none();
        };
        self.preview_ticking = true;
        Task::delayed(interval, Message::PreviewTick)
    }
}
