//! Client-declared interest filters and the substring matcher.

use serde::{Deserialize, Serialize};

use notifyhub_core::types::notification::Notification;

/// A single subscription: a required body pattern and an optional summary
/// pattern, both matched as case-sensitive literal substrings.
///
/// `url_pattern` is the identity of a subscription within one connection;
/// subscribing again with the same `url_pattern` replaces the old filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Substring that must appear in the notification body.
    pub url_pattern: String,
    /// Substring that must appear in the summary, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_pattern: Option<String>,
}

impl Subscription {
    /// Returns whether this subscription matches the notification.
    pub fn matches(&self, notification: &Notification) -> bool {
        if !notification.body.contains(&self.url_pattern) {
            return false;
        }
        match &self.summary_pattern {
            Some(pattern) => notification.summary.contains(pattern.as_str()),
            None => true,
        }
    }
}
