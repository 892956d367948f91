//! Wire message definitions for the client protocol.
//!
//! Only inbound control messages need a dedicated type; the outbound
//! direction carries plain serialized [`Notification`] objects.
//!
//! [`Notification`]: notifyhub_core::types::notification::Notification

pub mod types;

pub use types::ControlMessage;
