//! Subscription registry — maps each connection to its active filters.

use dashmap::DashMap;

use notifyhub_core::types::notification::Notification;

use crate::connection::handle::ConnectionId;

use super::filter::Subscription;

/// Registry of active subscriptions, keyed by connection.
///
/// Entries are mutated by client session tasks and scanned by the
/// dispatcher. DashMap's sharded locking keeps each entry's view consistent
/// without serializing unrelated clients against each other, and no I/O
/// ever happens while an entry guard is held.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    /// Connection ID → active subscriptions, in subscribe order.
    by_conn: DashMap<ConnectionId, Vec<Subscription>>,
}

impl SubscriptionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            by_conn: DashMap::new(),
        }
    }

    /// Registers a connection with an empty subscription set.
    pub fn add_client(&self, conn_id: ConnectionId) {
        self.by_conn.entry(conn_id).or_default();
    }

    /// Adds a subscription for a registered connection.
    ///
    /// A subscription with the same `url_pattern` is replaced in place, so
    /// a retried subscribe or a summary-pattern update is idempotent.
    /// Unregistered connections are never inserted here; a subscribe that
    /// races a disconnect is a no-op rather than an orphan entry.
    pub fn subscribe(&self, conn_id: ConnectionId, subscription: Subscription) {
        let Some(mut subs) = self.by_conn.get_mut(&conn_id) else {
            return;
        };
        match subs
            .iter_mut()
            .find(|s| s.url_pattern == subscription.url_pattern)
        {
            Some(existing) => *existing = subscription,
            None => subs.push(subscription),
        }
    }

    /// Removes the subscription with the given `url_pattern`, if present.
    /// Removing an absent pattern is a no-op, not an error.
    pub fn unsubscribe(&self, conn_id: ConnectionId, url_pattern: &str) {
        if let Some(mut subs) = self.by_conn.get_mut(&conn_id) {
            subs.retain(|s| s.url_pattern != url_pattern);
        }
    }

    /// Discards all subscriptions for a connection. Idempotent.
    pub fn remove_client(&self, conn_id: &ConnectionId) {
        self.by_conn.remove(conn_id);
    }

    /// Whether the connection holds a subscription with this pattern.
    pub fn contains(&self, conn_id: &ConnectionId, url_pattern: &str) -> bool {
        self.by_conn
            .get(conn_id)
            .map(|subs| subs.iter().any(|s| s.url_pattern == url_pattern))
            .unwrap_or(false)
    }

    /// Number of active subscriptions for a connection.
    pub fn subscription_count(&self, conn_id: &ConnectionId) -> usize {
        self.by_conn
            .get(conn_id)
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    /// Total subscription count across all connections.
    pub fn total_subscriptions(&self) -> usize {
        self.by_conn.iter().map(|entry| entry.value().len()).sum()
    }

    /// Connections whose filters match the notification, paired with the
    /// first matching subscription.
    ///
    /// At most one pair per connection: the first match short-circuits
    /// further checks for that client, which is what bounds delivery to
    /// at-most-once regardless of how many filters overlap.
    pub fn snapshot_for(&self, notification: &Notification) -> Vec<(ConnectionId, Subscription)> {
        self.by_conn
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .iter()
                    .find(|s| s.matches(notification))
                    .map(|s| (*entry.key(), s.clone()))
            })
            .collect()
    }
}
