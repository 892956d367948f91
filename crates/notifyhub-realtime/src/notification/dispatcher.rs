//! Broadcast dispatcher — fans one notification out to matching clients.

use std::sync::Arc;

use tracing::{debug, warn};

use notifyhub_core::types::notification::Notification;

use crate::connection::handle::SendOutcome;
use crate::connection::manager::ConnectionManager;

/// Fans each ingested notification out to every matching connection.
///
/// The registry snapshot and the per-client sends are separate phases: no
/// registry entry is locked while a message is queued, and every send is
/// non-blocking, so a slow or dead client cannot stall the pass or the
/// producer behind it.
#[derive(Debug)]
pub struct BroadcastDispatcher {
    /// Connection manager for delivery and failure cleanup.
    connections: Arc<ConnectionManager>,
}

impl BroadcastDispatcher {
    /// Creates a new dispatcher.
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }

    /// Delivers `notification` to every client with a matching
    /// subscription, at most once per client.
    ///
    /// A send failure removes that client from both registries and never
    /// aborts delivery to the rest; nothing propagates to the caller.
    pub fn dispatch(&self, notification: &Notification) {
        let matches = self
            .connections
            .subscriptions()
            .snapshot_for(notification);
        if matches.is_empty() {
            return;
        }

        // Serialize once for the whole pass
        let payload = match serde_json::to_string(notification) {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "Failed to serialize notification, dropping");
                return;
            }
        };

        debug!(clients = matches.len(), "Broadcasting notification");

        for (conn_id, subscription) in &matches {
            let Some(handle) = self.connections.pool().get(conn_id) else {
                // Raced a disconnect between snapshot and send
                continue;
            };

            match handle.send(payload.clone()) {
                SendOutcome::Sent => {
                    debug!(
                        conn_id = %conn_id,
                        url_pattern = %subscription.url_pattern,
                        "Notification queued"
                    );
                }
                SendOutcome::Dropped => {}
                SendOutcome::Closed => {
                    warn!(conn_id = %conn_id, "Send failed, removing client");
                    self.connections.unregister(conn_id);
                }
            }
        }
    }
}
