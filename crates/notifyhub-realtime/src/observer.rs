//! Observer seam for the ingest path.

use tracing::info;

use notifyhub_core::types::notification::Notification;

/// Hook invoked synchronously for each ingested notification.
///
/// Observers run on the producer's call path before dispatch and must not
/// block; anything slow belongs in its own task fed by a channel.
pub trait NotificationObserver: Send + Sync {
    /// Called once per ingested notification.
    fn on_notification(&self, notification: &Notification);
}

/// Observer that emits a structured log record for every notification.
#[derive(Debug, Default)]
pub struct LogObserver;

impl NotificationObserver for LogObserver {
    fn on_notification(&self, notification: &Notification) {
        info!(
            app_name = %notification.app_name,
            id = notification.id,
            summary = %notification.summary,
            actions = notification.actions.len(),
            hints = notification.hints.len(),
            expire_timeout = notification.expire_timeout,
            "Notification ingested"
        );
    }
}
