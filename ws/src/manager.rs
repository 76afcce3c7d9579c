use crate::connection::{BroadcastReport, ClientId, ConnectionId, ConnectionRegistry};
use crate::message::{Message as WsMessage, MessageScope};
use log::*;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};

/// Outbound queue length used when none is configured.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

pub struct Manager {
    registry: Arc<ConnectionRegistry>,
    channel_capacity: usize,
}

impl Manager {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Create a bounded outbound queue for a new socket and register it.
    /// The receiver belongs to the socket's writer task.
    pub fn open_channel(&self, client_id: ClientId) -> (ConnectionId, Receiver<String>) {
        let (sender, receiver) = mpsc::channel(self.channel_capacity);
        (self.register_connection(client_id, sender), receiver)
    }

    /// Register a new connection and return its unique ID
    pub fn register_connection(&self, client_id: ClientId, sender: Sender<String>) -> ConnectionId {
        let connection_id = self.registry.register(client_id, sender);
        info!("Registered WebSocket connection {connection_id} for client {client_id}");
        connection_id
    }

    /// Unregister a connection by ID
    pub fn unregister_connection(&self, connection_id: &ConnectionId) {
        info!("Unregistering WebSocket connection {connection_id}");
        self.registry.unregister(connection_id);
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Send a message based on its scope. Channels that cannot take the
    /// message are unregistered.
    pub fn send_message(&self, message: WsMessage) -> BroadcastReport {
        let text = message.notice.to_string();

        let report = match message.scope {
            MessageScope::Connection { connection_id } => {
                let mut report = BroadcastReport::default();
                match self.registry.send(&connection_id, &text) {
                    Ok(()) => report.delivered.push(connection_id),
                    Err(e) => {
                        warn!("Failed to send to connection {connection_id}: {e}");
                        self.registry.unregister(&connection_id);
                        report.failed.push(connection_id);
                    }
                }
                report
            }
            MessageScope::Broadcast => self.registry.broadcast(&text),
        };

        debug!(
            "Sent \"{}\" to {} connection(s), {} failed",
            text,
            report.delivered.len(),
            report.failed.len()
        );

        report
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ChannelState;
    use crate::message::Notice;

    #[test]
    fn open_channel_registers_and_delivers() {
        let manager = Manager::default();
        let (id, mut rx) = manager.open_channel(ClientId(3));

        let report = manager.send_message(WsMessage {
            notice: Notice::ProductDeleted { product_id: 5 },
            scope: MessageScope::Connection { connection_id: id },
        });

        assert_eq!(report.delivered, [id]);
        assert_eq!(rx.try_recv().unwrap(), "Product deleted: ID 5");
    }

    #[test]
    fn failed_connection_scoped_send_unregisters() {
        let manager = Manager::new(1);
        let (id, rx) = manager.open_channel(ClientId(3));
        drop(rx);

        let report = manager.send_message(WsMessage {
            notice: Notice::Echo { text: "hi".into() },
            scope: MessageScope::Connection { connection_id: id },
        });

        assert_eq!(report.failed, [id]);
        assert_eq!(manager.registry().state(&id), ChannelState::Closed);
        assert_eq!(manager.connection_count(), 0);
    }

    #[test]
    fn slow_client_is_dropped_when_its_queue_is_full() {
        let manager = Manager::new(1);
        let (slow, _slow_rx) = manager.open_channel(ClientId(1));
        let (fast, mut fast_rx) = manager.open_channel(ClientId(2));

        let first = manager.send_message(WsMessage {
            notice: Notice::CategoryDeleted { category_id: 1 },
            scope: MessageScope::Broadcast,
        });
        assert_eq!(first.delivered, [slow, fast]);
        assert_eq!(fast_rx.try_recv().unwrap(), "Product category deleted: ID 1");

        let second = manager.send_message(WsMessage {
            notice: Notice::CategoryDeleted { category_id: 2 },
            scope: MessageScope::Broadcast,
        });
        assert_eq!(second.delivered, [fast]);
        assert_eq!(second.failed, [slow]);
        assert_eq!(manager.connection_count(), 1);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let manager = Manager::new(0);
        let (id, mut rx) = manager.open_channel(ClientId(1));

        manager.send_message(WsMessage {
            notice: Notice::ClientLeft {
                client_id: ClientId(2),
            },
            scope: MessageScope::Connection { connection_id: id },
        });

        assert_eq!(rx.try_recv().unwrap(), "Client #2 left the chat");
        assert_eq!(manager.registry().state(&id), ChannelState::Open);
    }
}
