//! Host surfaces the controller drives.

use anyhow::Result;
use async_trait::async_trait;

use crate::notify::Notification;

/// Outbound signals surfaced to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSignal {
    /// A new controller version is installed and waiting to take over.
    UpdateAvailable,
}

/// Open client contexts (windows, tabs) of the served site.
///
/// Calls are best-effort: a failure is logged by the controller and
/// never fails the event that triggered it.
#[async_trait]
pub trait ClientRegistry: Send + Sync {
    /// Route in-flight pages to this controller immediately.
    async fn claim(&self) -> Result<()>;

    /// Broadcast a signal to every open context.
    async fn broadcast(&self, signal: UpdateSignal) -> Result<()>;

    /// Open a window at the URL, or focus one already showing it.
    async fn open_window(&self, url: &str) -> Result<()>;
}

/// Presents system notifications.
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    /// Display a notification.
    async fn show(&self, notification: Notification) -> Result<()>;

    /// Close a displayed notification by its reference key.
    async fn close(&self, reference: &str) -> Result<()>;
}
