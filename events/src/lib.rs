//! Event system infrastructure for the storefront.
//!
//! Domain operations publish a [`DomainEvent`] once a write has been
//! committed; infrastructure such as the WebSocket notifier reacts to it
//! through an [`EventHandler`].
//!
//! This crate has no dependencies on internal crates (entity, domain, etc.),
//! avoiding circular dependencies.

use async_trait::async_trait;
use std::sync::Arc;

/// A type alias that represents any Entity's internal id field data type.
/// This matches the definition in the entity crate to maintain compatibility.
pub type Id = i32;

/// Business-level changes, emitted only after the corresponding write
/// has been committed.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    CategoryCreated { category_id: Id, name: String },
    CategoryUpdated { category_id: Id, name: String },
    CategoryDeleted { category_id: Id },
    ProductCreated { product_id: Id, name: String },
    ProductUpdated { product_id: Id, name: String },
    ProductDeleted { product_id: Id },
}

/// Trait for handling domain events.
/// Implementations perform side effects like sending notifications.
/// A handler must not fail the mutation that produced the event.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DomainEvent);
}

/// Publishes domain events to registered handlers.
/// Handlers are called sequentially in registration order.
#[derive(Clone)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    /// Store the returned publisher in your application state.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Publish an event to all registered handlers, one after another.
    pub async fn publish(&self, event: DomainEvent) {
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
