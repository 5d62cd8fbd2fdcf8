// SPDX-License-Identifier: GPL-3.0-only

//! Single-threaded event loop driving the preview
//!
//! The loop owns the widget and a message queue. Tasks returned from
//! `update` are spawned on the tokio runtime; each posts its message back to
//! the queue when it resolves. Widget state is only ever touched here, so no
//! locking is needed. Must be driven from inside a tokio runtime.

use crate::app::state::{CameraPreview, Message};
use crate::app::task::Task;
use crate::backends::camera::LifecycleOwner;
use crate::backends::camera::types::CameraFacing;
use crate::errors::AppResult;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, error, info};

/// Cloneable sender for posting messages into a [`MainLoop`]
#[derive(Debug, Clone)]
pub struct LoopHandle {
    sender: UnboundedSender<Message>,
}

impl LoopHandle {
    /// Post a message; returns `false` once the loop is gone
    pub fn send(&self, message: Message) -> bool {
        self.sender.send(message).is_ok()
    }

    pub fn open_camera(&self, owner: LifecycleOwner, is_front: bool) -> bool {
        self.send(Message::OpenCamera {
            owner,
            facing: CameraFacing::from_is_front(is_front),
        })
    }

    pub fn switch_camera(&self, owner: LifecycleOwner, is_front: bool) -> bool {
        self.send(Message::SwitchCamera {
            owner,
            facing: CameraFacing::from_is_front(is_front),
        })
    }

    pub fn shutdown(&self) -> bool {
        self.send(Message::Shutdown)
    }
}

pub struct MainLoop {
    widget: CameraPreview,
    sender: UnboundedSender<Message>,
    receiver: UnboundedReceiver<Message>,
    stopped: bool,
}

impl MainLoop {
    pub fn new(widget: CameraPreview) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            widget,
            sender,
            receiver,
            stopped: false,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            sender: self.sender.clone(),
        }
    }

    pub fn widget(&self) -> &CameraPreview {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut CameraPreview {
        &mut self.widget
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Handle one message immediately and schedule its follow-up tasks
    pub fn dispatch(&mut self, message: Message) -> AppResult<()> {
        let shutdown = matches!(message, Message::Shutdown);
        let task = self.widget.update(message).inspect_err(|e| {
            error!(error = %e, "Fatal error in camera preview, stopping event loop");
            self.stopped = true;
        })?;
        self.spawn(task);
        if shutdown {
            info!("Event loop stopped");
            self.stopped = true;
        }
        Ok(())
    }

    /// Hand a task's futures to the runtime
    pub fn spawn(&self, task: Task<Message>) {
        for future in task.into_futures() {
            let sender = self.sender.clone();
            tokio::spawn(async move {
                let message = future.await;
                if sender.send(message).is_err() {
                    debug!("Event loop gone, dropping task result");
                }
            });
        }
    }

    /// Process queued messages until `done` holds or the loop stops
    ///
    /// `done` is checked before waiting, so an already satisfied condition
    /// returns without consuming anything.
    pub async fn run_until<F>(&mut self, mut done: F) -> AppResult<()>
    where
        F: FnMut(&CameraPreview) -> bool,
    {
        while !self.stopped && !done(&self.widget) {
            let Some(message) = self.receiver.recv().await else {
                break;
            };
            self.dispatch(message)?;
        }
        Ok(())
    }

    /// Run until [`Message::Shutdown`] and return the widget
    pub async fn run(mut self) -> AppResult<CameraPreview> {
        self.run_until(|_| false).await?;
        Ok(self.widget)
    }
}
