//! The immutable notification record routed to subscribers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single desktop notification event.
///
/// Constructed once per producer event by the ingest path, matched against
/// client subscriptions, and discarded after the dispatch pass. Serializes
/// to the outbound wire object delivered to matching clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Name of the application that emitted the notification.
    pub app_name: String,
    /// Numeric id supplied by the producer (`replaces_id` on the wire).
    pub id: u32,
    /// Icon reference.
    pub icon: String,
    /// Short summary line.
    pub summary: String,
    /// Free-text body.
    pub body: String,
    /// Ordered list of action identifiers.
    pub actions: Vec<String>,
    /// Arbitrary-typed hint values keyed by name.
    pub hints: HashMap<String, serde_json::Value>,
    /// Expiry timeout in milliseconds; negative means "server default".
    pub expire_timeout: i32,
}
