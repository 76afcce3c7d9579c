//! Chat room notices exchanged over the `/ws/{client_id}` socket.

use crate::connection::{BroadcastReport, ClientId, ConnectionId};
use crate::message::{Message, MessageScope, Notice};
use crate::Manager;

/// Announce a newly registered connection to everyone, itself included.
pub fn joined(manager: &Manager, client_id: ClientId) -> BroadcastReport {
    manager.send_message(Message {
        notice: Notice::ClientJoined { client_id },
        scope: MessageScope::Broadcast,
    })
}

/// Echo `text` privately to the sending connection, then broadcast it.
pub fn said(
    manager: &Manager,
    connection_id: ConnectionId,
    client_id: ClientId,
    text: &str,
) -> BroadcastReport {
    manager.send_message(Message {
        notice: Notice::Echo {
            text: text.to_owned(),
        },
        scope: MessageScope::Connection { connection_id },
    });

    manager.send_message(Message {
        notice: Notice::ClientSaid {
            client_id,
            text: text.to_owned(),
        },
        scope: MessageScope::Broadcast,
    })
}

/// Announce a departure. Call after the connection has been unregistered.
pub fn left(manager: &Manager, client_id: ClientId) -> BroadcastReport {
    manager.send_message(Message {
        notice: Notice::ClientLeft { client_id },
        scope: MessageScope::Broadcast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::Receiver;

    fn drain(rx: &mut Receiver<String>) -> Vec<String> {
        let mut received = Vec::new();
        while let Ok(text) = rx.try_recv() {
            received.push(text);
        }
        received
    }

    #[test]
    fn two_clients_chat_and_one_leaves() {
        let manager = Manager::default();

        let (a, mut rx_a) = manager.open_channel(ClientId(1));
        joined(&manager, ClientId(1));
        let (b, mut rx_b) = manager.open_channel(ClientId(2));
        joined(&manager, ClientId(2));

        assert_eq!(
            drain(&mut rx_a),
            ["Client #1 joined the chat", "Client #2 joined the chat"]
        );
        assert_eq!(drain(&mut rx_b), ["Client #2 joined the chat"]);

        said(&manager, a, ClientId(1), "hello");

        assert_eq!(drain(&mut rx_a), ["You wrote: hello", "Client #1 says: hello"]);
        assert_eq!(drain(&mut rx_b), ["Client #1 says: hello"]);

        manager.unregister_connection(&b);
        left(&manager, ClientId(2));

        assert_eq!(drain(&mut rx_a), ["Client #2 left the chat"]);
        assert!(drain(&mut rx_b).is_empty());
    }
}
