use crate::categories::Model;
use crate::error::Error;
use crate::mutation;
use crate::Id;
use entity_api::category as CategoryApi;
use events::{DomainEvent, EventPublisher};
use sea_orm::DatabaseConnection;

pub use entity_api::category::Changes;

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Ok(CategoryApi::find_by_id(db, id).await?)
}

/// One page in creation order.
pub async fn find_page(db: &DatabaseConnection, skip: u64, limit: u64) -> Result<Vec<Model>, Error> {
    Ok(CategoryApi::find_page(db, skip, limit).await?)
}

pub async fn create(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    category_model: Model,
) -> Result<Model, Error> {
    mutation::commit(
        event_publisher,
        CategoryApi::create(db, category_model).await,
        |category| DomainEvent::CategoryCreated {
            category_id: category.id,
            name: category.name.clone(),
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
        CategoryApi::update(db, id, changes).await,
        |category| DomainEvent::CategoryUpdated {
            category_id: category.id,
            name: category.name.clone(),
        },
    )
    .await
}

/// Refused with a conflict while any product still belongs to the category.
pub async fn delete_by_id(
    db: &DatabaseConnection,
    event_publisher: &EventPublisher,
    id: Id,
) -> Result<(), Error> {
    mutation::commit(
        event_publisher,
        CategoryApi::delete_by_id(db, id).await,
        |_| DomainEvent::CategoryDeleted { category_id: id },
    )
    .await
}
