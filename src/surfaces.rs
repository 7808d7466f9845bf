//! Host surfaces the selector reports to
//!
//! Notifications, navigation and the clipboard belong to whatever shell
//! hosts the selector. [`UiSurface`] forwards all three over a channel so
//! the iced application can turn them into widgets and commands.

use crate::error::{AppError, AppResult};
use crate::models::Toast;
use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, toast: Toast);
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Closes the current screen and returns to the root of the navigation stack.
    async fn pop_to_root(&self) -> AppResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> AppResult<()>;
}

/// Requests emitted towards the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Notify(Toast),
    PopToRoot,
    CopyToClipboard(String),
}

#[derive(Clone)]
pub struct UiSurface {
    sender: UnboundedSender<SurfaceEvent>,
}

impl UiSurface {
    pub fn channel() -> (Self, UnboundedReceiver<SurfaceEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    fn emit(&self, event: SurfaceEvent) -> AppResult<()> {
        self.sender
            .send(event)
            .map_err(|_| AppError::operation_failed("UI surface is no longer listening"))
    }
}

#[async_trait]
impl Notifier for UiSurface {
    async fn notify(&self, toast: Toast) {
        log::debug!("Toast: {}", toast);
        if self.emit(SurfaceEvent::Notify(toast)).is_err() {
            log::warn!("Dropped notification, UI surface closed");
        }
    }
}

#[async_trait]
impl Navigator for UiSurface {
    async fn pop_to_root(&self) -> AppResult<()> {
        self.emit(SurfaceEvent::PopToRoot)
    }
}

#[async_trait]
impl Clipboard for UiSurface {
    async fn write_text(&self, text: &str) -> AppResult<()> {
        self.emit(SurfaceEvent::CopyToClipboard(text.to_string()))
    }
}
