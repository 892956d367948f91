//! Inbound control message type definitions.

use serde::{Deserialize, Serialize};

use crate::subscription::filter::Subscription;

/// Control messages sent by a client.
///
/// Wire form: `{"type": "subscribe"|"unsubscribe", "payload": {...}}`.
/// Anything that fails to parse into this enum is logged and ignored by
/// the session handler; the connection stays open.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ControlMessage {
    /// Declare interest in notifications matching a filter.
    Subscribe(Subscription),
    /// Withdraw the subscription with the given `url_pattern`.
    Unsubscribe(UnsubscribePayload),
}

/// Payload of an `unsubscribe` control message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribePayload {
    /// The `url_pattern` of the subscription to remove.
    pub url_pattern: String,
}
