//! Request DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Producer-facing notify request: the raw fields of one notification
/// event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyRequest {
    /// Emitting application name.
    pub app_name: String,
    /// Producer-assigned numeric id.
    #[serde(default)]
    pub replaces_id: u32,
    /// Icon reference.
    #[serde(default)]
    pub icon: String,
    /// Summary line.
    pub summary: String,
    /// Free-text body.
    pub body: String,
    /// Ordered action list.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Arbitrary-typed hints.
    #[serde(default)]
    pub hints: HashMap<String, serde_json::Value>,
    /// Expiry timeout in milliseconds; negative means "server default".
    #[serde(default = "default_expire_timeout")]
    pub expire_timeout: i32,
}

fn default_expire_timeout() -> i32 {
    -1
}
