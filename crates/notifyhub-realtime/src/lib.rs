//! # notifyhub-realtime
//!
//! Notification fan-out engine for NotifyHub. Provides:
//!
//! - Connection lifecycle management with bounded per-client outbound queues
//! - Pattern-based subscription registry (body/summary substring filters)
//! - Serial notification ingest with synchronous observers
//! - Broadcast dispatch with per-client failure isolation

pub mod connection;
pub mod message;
pub mod notification;
pub mod observer;
pub mod server;
pub mod subscription;

pub use connection::manager::ConnectionManager;
pub use notification::dispatcher::BroadcastDispatcher;
pub use notification::ingest::NotificationIngest;
pub use server::RouterEngine;
pub use subscription::registry::SubscriptionRegistry;
