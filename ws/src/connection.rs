use crate::error::{Error, ErrorKind};
use dashmap::DashMap;
use log::*;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{error::TrySendError, Sender};

/// Client-chosen identifier taken from the `/ws/{client_id}` path.
/// Several connections may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub i64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a connection (server-generated). Ids increase
/// monotonically, so ordering by id is ordering by registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a registered notification channel. A socket still in its
/// upgrade handshake has no entry yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// Registered and eligible for delivery.
    Open,
    /// Unregistered. Terminal.
    Closed,
}

#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub client_id: ClientId,
    pub sender: Sender<String>,
}

/// Outcome of a fan-out, in the order delivery was attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: Vec<ConnectionId>,
    pub failed: Vec<ConnectionId>,
}

/// Registry of open channels keyed by connection id.
pub struct ConnectionRegistry {
    next_id: AtomicU64,
    connections: DashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            connections: DashMap::new(),
        }
    }

    /// Register a new connection - O(1)
    pub fn register(&self, client_id: ClientId, sender: Sender<String>) -> ConnectionId {
        let connection_id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.connections
            .insert(connection_id, ConnectionInfo { client_id, sender });

        connection_id
    }

    /// Unregister a connection - O(1). Unknown ids are ignored.
    pub fn unregister(&self, connection_id: &ConnectionId) {
        if let Some((_, info)) = self.connections.remove(connection_id) {
            debug!(
                "Removed connection {connection_id} for client {}",
                info.client_id
            );
        }
    }

    pub fn state(&self, connection_id: &ConnectionId) -> ChannelState {
        if self.connections.contains_key(connection_id) {
            ChannelState::Open
        } else {
            ChannelState::Closed
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Queue `text` on exactly one channel. The caller decides whether a
    /// failure should unregister it.
    pub fn send(&self, connection_id: &ConnectionId, text: &str) -> Result<(), Error> {
        let sender = self
            .connections
            .get(connection_id)
            .map(|info| info.sender.clone());

        match sender {
            Some(sender) => queue(*connection_id, &sender, text),
            None => Err(Error {
                connection_id: *connection_id,
                error_kind: ErrorKind::ChannelClosed,
            }),
        }
    }

    /// Send to every open connection in registration order - O(n)
    ///
    /// The set of targets is fixed before the first send. Channels that fail
    /// are unregistered once every target has been attempted.
    pub fn broadcast(&self, text: &str) -> BroadcastReport {
        let mut targets: Vec<(ConnectionId, ConnectionInfo)> = self
            .connections
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        targets.sort_by_key(|(id, _)| *id);

        let mut report = BroadcastReport::default();

        for (connection_id, info) in targets {
            match queue(connection_id, &info.sender, text) {
                Ok(()) => report.delivered.push(connection_id),
                Err(e) => {
                    warn!(
                        "Failed to send to connection {connection_id} (client {}): {e}. Connection will be cleaned up.",
                        info.client_id
                    );
                    report.failed.push(connection_id);
                }
            }
        }

        for connection_id in &report.failed {
            self.unregister(connection_id);
        }

        report
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn queue(connection_id: ConnectionId, sender: &Sender<String>, text: &str) -> Result<(), Error> {
    sender.try_send(text.to_owned()).map_err(|e| Error {
        connection_id,
        error_kind: match e {
            TrySendError::Full(_) => ErrorKind::ChannelFull,
            TrySendError::Closed(_) => ErrorKind::ChannelClosed,
        },
    })
}
