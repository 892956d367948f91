//! # notifyhub-api
//!
//! HTTP and WebSocket surface for NotifyHub: the producer ingest endpoint,
//! the client WebSocket session handler, and health checks.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
