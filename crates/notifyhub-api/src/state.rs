//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use notifyhub_core::config::AppConfig;
use notifyhub_realtime::server::RouterEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Notification router engine
    pub engine: Arc<RouterEngine>,
}
