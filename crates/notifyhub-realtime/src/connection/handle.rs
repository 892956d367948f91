//! Individual client connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// Outcome of a non-blocking send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Message queued for delivery.
    Sent,
    /// Outbound queue full; message dropped, connection kept.
    Dropped,
    /// Receiver gone; the connection is dead.
    Closed,
}

/// A handle to a single client connection.
///
/// Holds the bounded sender feeding the connection's outbound forwarder
/// task, plus an open-latch that makes disconnect cleanup run exactly once
/// even when a read error races a failed write.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Sender for serialized outbound messages
    sender: mpsc::Sender<String>,
    /// When the connection was established
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still open
    open: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle around an outbound queue sender.
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            connected_at: Utc::now(),
            open: AtomicBool::new(true),
        }
    }

    /// Attempt to queue a serialized message without blocking.
    ///
    /// A full queue drops the message (drop-newest; the client stays
    /// connected). A closed queue marks the connection dead so the caller
    /// can remove it from the registries.
    pub fn send(&self, msg: String) -> SendOutcome {
        if !self.is_open() {
            return SendOutcome::Closed;
        }
        match self.sender.try_send(msg) {
            Ok(()) => SendOutcome::Sent,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    conn_id = %self.id,
                    "Outbound queue full, dropping notification"
                );
                SendOutcome::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                SendOutcome::Closed
            }
        }
    }

    /// Check whether the connection is still open.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Latch the connection closed.
    ///
    /// Returns `true` only for the caller that performed the transition;
    /// later callers see `false`.
    pub fn mark_closed(&self) -> bool {
        self.open.swap(false, Ordering::SeqCst)
    }
}
