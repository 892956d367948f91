//! Notification ingest — the producer-facing entry point.

use std::collections::HashMap;
use std::sync::Arc;

use notifyhub_core::types::notification::Notification;

use crate::notification::dispatcher::BroadcastDispatcher;
use crate::observer::NotificationObserver;

/// Acknowledgement id returned to the producer for every event.
const ACK_ID: u32 = 1;

/// Serial entry point for producer events.
///
/// Builds the immutable notification record, runs the synchronous
/// observers, and hands the record to the dispatcher. Returns before any
/// per-client I/O completes; the producer is never blocked by a consumer.
pub struct NotificationIngest {
    /// Broadcast dispatcher.
    dispatcher: Arc<BroadcastDispatcher>,
    /// Observers invoked synchronously per ingested notification.
    observers: Vec<Arc<dyn NotificationObserver>>,
}

impl std::fmt::Debug for NotificationIngest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationIngest")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl NotificationIngest {
    /// Creates a new ingest front-end for a dispatcher.
    pub fn new(dispatcher: Arc<BroadcastDispatcher>) -> Self {
        Self {
            dispatcher,
            observers: Vec::new(),
        }
    }

    /// Registers an observer invoked synchronously for every ingested
    /// notification, before dispatch. Observers must not block.
    pub fn register_observer(&mut self, observer: Arc<dyn NotificationObserver>) {
        self.observers.push(observer);
    }

    /// Ingests one producer event and returns the fixed acknowledgement.
    ///
    /// This path never errors: a notification that cannot be delivered
    /// anywhere is simply dropped after the observers have seen it.
    #[allow(clippy::too_many_arguments)]
    pub fn notify(
        &self,
        app_name: String,
        replaces_id: u32,
        icon: String,
        summary: String,
        body: String,
        actions: Vec<String>,
        hints: HashMap<String, serde_json::Value>,
        expire_timeout: i32,
    ) -> u32 {
        let notification = Notification {
            app_name,
            id: replaces_id,
            icon,
            summary,
            body,
            actions,
            hints,
            expire_timeout,
        };

        for observer in &self.observers {
            observer.on_notification(&notification);
        }

        self.dispatcher.dispatch(&notification);

        ACK_ID
    }
}
