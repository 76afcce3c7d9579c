use super::error::Error;
use entity::categories::{ActiveModel, Column, Entity, Model};
use entity::{products, Id};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, ConnectionTrait, DatabaseConnection, IntoActiveModel,
    PaginatorTrait, QueryOrder, QuerySelect, TransactionTrait,
};

use log::*;

/// Fields that may change on an existing category. `None` leaves the field
/// as stored; `description: Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Changes {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

pub async fn create(db: &DatabaseConnection, category_model: Model) -> Result<Model, Error> {
    debug!("New Category Model to be inserted: {:?}", category_model);

    validate_name(&category_model.name)?;
    ensure_name_available(db, &category_model.name, None).await?;

    let now = chrono::Utc::now();

    let category_active_model: ActiveModel = ActiveModel {
        name: Set(category_model.name),
        description: Set(category_model.description),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(category_active_model.insert(db).await?)
}

pub async fn update(db: &DatabaseConnection, id: Id, changes: Changes) -> Result<Model, Error> {
    let category = find_by_id(db, id).await?;
    debug!(
        "Existing Category model to be Updated: {:?}, changes: {:?}",
        category, changes
    );

    if let Some(name) = &changes.name {
        validate_name(name)?;
        ensure_name_available(db, name, Some(id)).await?;
    }

    let mut active_model = category.into_active_model();
    if let Some(name) = changes.name {
        active_model.name = Set(name);
    }
    if let Some(description) = changes.description {
        active_model.description = Set(description);
    }
    active_model.updated_at = Set(chrono::Utc::now().into());

    Ok(active_model.update(db).await?)
}

/// Deletes a category that no product refers to. The reference check and the
/// delete share one transaction.
pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    let category = find_by_id(&txn, id).await?;

    let referencing_products = products::Entity::find()
        .filter(products::Column::CategoryId.eq(id))
        .count(&txn)
        .await?;

    if referencing_products > 0 {
        debug!(
            "Category {} is still referenced by {} product(s)",
            id, referencing_products
        );
        return Err(Error::conflict(format!(
            "Category {id} is still referenced by {referencing_products} product(s)"
        )));
    }

    category.delete(&txn).await?;
    txn.commit().await?;

    Ok(())
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

/// Categories in creation order.
pub async fn find_page(db: &DatabaseConnection, skip: u64, limit: u64) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .order_by_asc(Column::Id)
        .offset(skip)
        .limit(limit)
        .all(db)
        .await?)
}

fn validate_name(name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::validation("name", "name must not be blank"));
    }
    Ok(())
}

async fn ensure_name_available(
    db: &DatabaseConnection,
    name: &str,
    exclude_id: Option<Id>,
) -> Result<(), Error> {
    let mut query = Entity::find().filter(Column::Name.eq(name));
    if let Some(id) = exclude_id {
        query = query.filter(Column::Id.ne(id));
    }

    match query.one(db).await? {
        Some(existing) => Err(Error::conflict(format!(
            "Category name '{}' is already used by category {}",
            existing.name, existing.id
        ))),
        None => Ok(()),
    }
}
