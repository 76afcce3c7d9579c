use crate::message::{Message as WsMessage, MessageScope, Notice};
use crate::Manager;
use async_trait::async_trait;
use events::{DomainEvent, EventHandler};
use log::*;
use std::sync::Arc;

/// Broadcasts every committed catalog mutation to all open WebSocket connections.
pub struct WsDomainEventHandler {
    ws_manager: Arc<Manager>,
}

impl WsDomainEventHandler {
    pub fn new(ws_manager: Arc<Manager>) -> Self {
        Self { ws_manager }
    }
}

fn notice_for(event: &DomainEvent) -> Notice {
    match event {
        DomainEvent::CategoryCreated { name, .. } => Notice::CategoryAdded { name: name.clone() },
        DomainEvent::CategoryUpdated { name, .. } => Notice::CategoryUpdated { name: name.clone() },
        DomainEvent::CategoryDeleted { category_id } => Notice::CategoryDeleted {
            category_id: *category_id,
        },
        DomainEvent::ProductCreated { name, .. } => Notice::ProductAdded { name: name.clone() },
        DomainEvent::ProductUpdated { name, .. } => Notice::ProductUpdated { name: name.clone() },
        DomainEvent::ProductDeleted { product_id } => Notice::ProductDeleted {
            product_id: *product_id,
        },
    }
}

#[async_trait]
impl EventHandler for WsDomainEventHandler {
    async fn handle(&self, event: &DomainEvent) {
        debug!("Handling domain event {:?}", event);

        let report = self.ws_manager.send_message(WsMessage {
            notice: notice_for(event),
            scope: MessageScope::Broadcast,
        });

        if !report.failed.is_empty() {
            debug!("Dropped connections during broadcast: {:?}", report.failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ClientId;

    #[tokio::test]
    async fn domain_events_become_broadcast_notices() {
        let manager = Arc::new(Manager::default());
        let (_a, mut rx_a) = manager.open_channel(ClientId(1));
        let (_b, mut rx_b) = manager.open_channel(ClientId(2));
        let handler = WsDomainEventHandler::new(Arc::clone(&manager));

        handler
            .handle(&DomainEvent::CategoryCreated {
                category_id: 1,
                name: "Garden".into(),
            })
            .await;
        handler
            .handle(&DomainEvent::ProductUpdated {
                product_id: 4,
                name: "Rake".into(),
            })
            .await;

        for rx in [&mut rx_a, &mut rx_b] {
            assert_eq!(rx.try_recv().unwrap(), "Category added: Garden");
            assert_eq!(rx.try_recv().unwrap(), "Product updated: Rake");
        }
    }

    #[test]
    fn deletions_carry_the_removed_id() {
        assert_eq!(
            notice_for(&DomainEvent::CategoryDeleted { category_id: 3 }).to_string(),
            "Product category deleted: ID 3"
        );
        assert_eq!(
            notice_for(&DomainEvent::ProductDeleted { product_id: 8 }).to_string(),
            "Product deleted: ID 8"
        );
    }
}
