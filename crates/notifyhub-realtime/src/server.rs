//! Top-level router engine that ties together all subsystems.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use notifyhub_core::config::realtime::RealtimeConfig;

use crate::connection::manager::ConnectionManager;
use crate::notification::dispatcher::BroadcastDispatcher;
use crate::notification::ingest::NotificationIngest;
use crate::observer::LogObserver;
use crate::subscription::registry::SubscriptionRegistry;

/// Central engine coordinating the registries, dispatch, and ingest.
#[derive(Clone)]
pub struct RouterEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Subscription registry.
    pub subscriptions: Arc<SubscriptionRegistry>,
    /// Broadcast dispatcher.
    pub dispatcher: Arc<BroadcastDispatcher>,
    /// Notification ingest.
    pub ingest: Arc<NotificationIngest>,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RouterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterEngine").finish()
    }
}

impl RouterEngine {
    /// Creates a new engine with all subsystems.
    pub fn new(config: RealtimeConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let subscriptions = Arc::new(SubscriptionRegistry::new());
        let connections = Arc::new(ConnectionManager::new(config, subscriptions.clone()));
        let dispatcher = Arc::new(BroadcastDispatcher::new(connections.clone()));

        let mut ingest = NotificationIngest::new(dispatcher.clone());
        ingest.register_observer(Arc::new(LogObserver));
        let ingest = Arc::new(ingest);

        info!("Router engine initialized");

        Self {
            connections,
            subscriptions,
            dispatcher,
            ingest,
            shutdown_tx,
        }
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Initiates a graceful shutdown: signals tasks and closes connections.
    pub fn shutdown(&self) {
        info!("Shutting down router engine");
        let _ = self.shutdown_tx.send(());
        self.connections.close_all();
        info!("Router engine shut down");
    }
}
