//! Real-time routing configuration.

use serde::{Deserialize, Serialize};

/// Real-time (WebSocket fan-out) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Bounded per-connection outbound queue size. When a client's queue
    /// is full, further notifications for it are dropped (drop-newest).
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Maximum pattern subscriptions per connection.
    #[serde(default = "default_max_subscriptions")]
    pub max_subscriptions_per_connection: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            max_subscriptions_per_connection: default_max_subscriptions(),
        }
    }
}

fn default_channel_buffer() -> usize {
    256
}

fn default_max_subscriptions() -> usize {
    50
}
