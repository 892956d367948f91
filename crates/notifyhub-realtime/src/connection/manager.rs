//! Connection manager — handles connection lifecycle (register, remove,
//! inbound control routing).

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use notifyhub_core::config::realtime::RealtimeConfig;

use crate::message::types::ControlMessage;
use crate::subscription::filter::Subscription;
use crate::subscription::registry::SubscriptionRegistry;

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active client connections and their registry bookkeeping.
///
/// Registration and removal update the connection pool and the subscription
/// registry as one logical unit, so a client present in one is always
/// present in the other.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Subscription registry.
    subscriptions: Arc<SubscriptionRegistry>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(config: RealtimeConfig, subscriptions: Arc<SubscriptionRegistry>) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            subscriptions,
            config,
        }
    }

    /// Registers a new connection with an empty subscription set.
    ///
    /// Returns the connection handle and the receiver feeding its outbound
    /// forwarder task.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);

        let handle = Arc::new(ConnectionHandle::new(tx));
        self.pool.add(handle.clone());
        self.subscriptions.add_client(handle.id);

        info!(
            conn_id = %handle.id,
            total = self.pool.connection_count(),
            "Client connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection and discards its subscriptions.
    ///
    /// Safe to call from both the session teardown and a failed dispatch
    /// send; only the caller that wins the pool removal performs cleanup.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_closed();
            self.subscriptions.remove_client(conn_id);

            info!(
                conn_id = %conn_id,
                remaining = self.pool.connection_count(),
                "Client connection removed"
            );
        }
    }

    /// Processes an inbound control message from a client.
    ///
    /// Malformed or unknown messages are logged and ignored; the
    /// connection stays open and no registry state changes.
    pub fn handle_inbound(&self, conn_id: &ConnectionId, raw_message: &str) {
        if self.pool.get(conn_id).is_none() {
            warn!(conn_id = %conn_id, "Control message from unknown connection");
            return;
        }

        let msg: ControlMessage = match serde_json::from_str(raw_message) {
            Ok(m) => m,
            Err(e) => {
                warn!(
                    conn_id = %conn_id,
                    error = %e,
                    "Ignoring malformed control message"
                );
                return;
            }
        };

        match msg {
            ControlMessage::Subscribe(subscription) => {
                self.handle_subscribe(conn_id, subscription);
            }
            ControlMessage::Unsubscribe(payload) => {
                self.subscriptions.unsubscribe(*conn_id, &payload.url_pattern);
                debug!(
                    conn_id = %conn_id,
                    url_pattern = %payload.url_pattern,
                    "Client unsubscribed"
                );
            }
        }
    }

    /// Applies a subscribe request, enforcing the per-connection cap.
    fn handle_subscribe(&self, conn_id: &ConnectionId, subscription: Subscription) {
        if subscription.url_pattern.is_empty() {
            warn!(conn_id = %conn_id, "Ignoring subscribe with empty url_pattern");
            return;
        }

        // A replace never grows the set, so it is exempt from the cap
        let is_replace = self.subscriptions.contains(conn_id, &subscription.url_pattern);
        if !is_replace
            && self.subscriptions.subscription_count(conn_id)
                >= self.config.max_subscriptions_per_connection
        {
            warn!(
                conn_id = %conn_id,
                max = self.config.max_subscriptions_per_connection,
                "Subscription limit reached, ignoring subscribe"
            );
            return;
        }

        debug!(
            conn_id = %conn_id,
            url_pattern = %subscription.url_pattern,
            summary_pattern = ?subscription.summary_pattern,
            "Client subscribed"
        );
        self.subscriptions.subscribe(*conn_id, subscription);
    }

    /// Closes and removes all connections (shutdown path).
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            self.unregister(&conn.id);
        }
        info!(count = all.len(), "All connections closed");
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }

    /// Returns the subscription registry.
    pub fn subscriptions(&self) -> &Arc<SubscriptionRegistry> {
        &self.subscriptions
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }
}
