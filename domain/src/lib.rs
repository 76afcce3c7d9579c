//! Catalog operations for the storefront.
//!
//! Reads pass straight through to `entity_api`. Every successful write
//! publishes exactly one [`events::DomainEvent`] after the repository call has
//! returned, so a notification is never seen before the change is readable.

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{categories, products, Id};

pub use events;

pub mod category;
pub mod error;
pub mod product;

mod mutation;

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use events::{DomainEvent, EventHandler, EventPublisher};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};
    use std::sync::{Arc, Mutex};

    pub(crate) async fn database() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    /// Records every published event.
    #[derive(Default)]
    pub(crate) struct Recorder {
        events: Mutex<Vec<DomainEvent>>,
    }

    impl Recorder {
        pub(crate) fn events(&self) -> Vec<DomainEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EventHandler for Recorder {
        async fn handle(&self, event: &DomainEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    pub(crate) fn recording_publisher() -> (EventPublisher, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let publisher = EventPublisher::new().with_handler(recorder.clone());
        (publisher, recorder)
    }
}
