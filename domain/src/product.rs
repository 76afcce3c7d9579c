use crate::error::Error;
use crate::mutation;
use crate::products::Model;
use crate::Id;
use entity_api::product as ProductApi;
use events::{DomainEvent, EventPublisher};
use sea_orm::DatabaseConnection;

pub use entity_api::product::Changes;

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(ProductApi::find_by_id(db, id).await?)
}

/// One page in creation order.
pub async fn find_page(db: &DatabaseConnection, skip: u64, limit: u64) -> Result<Vec<Model>, Error> {
    Ok(ProductApi::find_page(db, skip, limit).await?)
}

pub async fn create(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    product_model: Model,
) -> Result<Model, Error> {
    mutation::commit(
        event_publisher,
        ProductApi::create(db, product_model).await,
        |product| DomainEvent::ProductCreated {
            product_id: product.id,
            name: product.name.clone(),
        },
    )
    .await
}

pub async fn update(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
    changes: Changes,
) -> Result<Model, Error> {
    mutation::commit(
        event_publisher,
        ProductApi::update(db, id, changes).await,
        |product| DomainEvent::ProductUpdated {
            product_id: product.id,
            name: product.name.clone(),
        },
    )
    .await
}

pub async fn delete_by_id(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<(), Error> {
    mutation::commit(
        event_publisher,
        ProductApi::delete_by_id(db, id).await,
        |_| DomainEvent::ProductDeleted { product_id: id },
    )
    .await
}
