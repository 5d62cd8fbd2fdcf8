// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The `update()` function routes each message to a handler in
//! `handlers::camera`. Handlers return a [`Task`] with follow-up work, or a
//! fatal error that stops the event loop.

use crate::app::state::{CameraPreview, Message};
use crate::app::task::Task;
use crate::errors::AppResult;
use tracing::debug;

impl CameraPreview {
    /// Main message handler - routes messages to handler methods.
    pub fn update(&mut self, message: Message) -> AppResult<Task<Message>> {
        match message {
            Message::OpenCamera { owner, facing } => self.open_camera(owner, facing.is_front()),
            Message::ProviderReady(result) => self.handle_provider_ready(result),
            Message::SwitchCamera { owner, facing } => {
                self.switch_camera(owner, facing.is_front())
            }
            Message::HideOverlay => Ok(self.handle_hide_overlay()),
            Message::PreviewTick => Ok(self.handle_preview_tick()),
            Message::FrameReceived(frame) => {
                let (facing, sequence) = (frame.facing, frame.sequence);
                if !self.frame_received(frame) {
                    debug!(?facing, sequence, "Dropped frame not matching the bound camera");
                }
                Ok(Task::none())
            }
            Message::ReleaseOwner(owner) => {
                self.release(&owner);
                Ok(Task::none())
            }
            Message::Shutdown => Ok(self.handle_shutdown()),
        }
    }
}
