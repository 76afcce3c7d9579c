use super::error::Error;
use entity::products::{ActiveModel, Column, Entity, Model};
use entity::{categories, Id};
use sea_orm::{
    entity::prelude::*, ActiveValue::Set, DatabaseConnection, IntoActiveModel, QueryOrder,
    QuerySelect,
};

use log::*;

/// Fields that may change on an existing product. `None` leaves the field
/// as stored; `description: Some(None)` clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Changes {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub category_id: Option<Id>,
}

pub async fn create(db: &DatabaseConnection, product_model: Model) -> Result<Model, Error> {
    debug!("New Product Model to be inserted: {:?}", product_model);

    validate_name(&product_model.name)?;
    validate_price(product_model.price)?;
    ensure_category_exists(db, product_model.category_id).await?;

    let now = chrono::Utc::now();

    let product_active_model: ActiveModel = ActiveModel {
        name: Set(product_model.name),
        description: Set(product_model.description),
        price: Set(product_model.price),
        category_id: Set(product_model.category_id),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(product_active_model.insert(db).await?)
}

pub async fn update(db: &DatabaseConnection, id: Id, changes: Changes) -> Result<Model, Error> {
    let product = find_by_id(db, id).await?;
    debug!(
        "Existing Product model to be Updated: {:?}, changes: {:?}",
        product, changes
    );

    if let Some(name) = &changes.name {
        validate_name(name)?;
    }
    if let Some(price) = changes.price {
        validate_price(price)?;
    }
    if let Some(category_id) = changes.category_id {
        ensure_category_exists(db, category_id).await?;
    }

    let mut active_model = product.into_active_model();
    if let Some(name) = changes.name {
        active_model.name = Set(name);
    }
    if let Some(description) = changes.description {
        active_model.description = Set(description);
    }
    if let Some(price) = changes.price {
        active_model.price = Set(price);
    }
    if let Some(category_id) = changes.category_id {
        active_model.category_id = Set(category_id);
    }
    active_model.updated_at = Set(chrono::Utc::now().into());

    Ok(active_model.update(db).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let result = find_by_id(db, id).await?;

    result.delete(db).await?;
    Ok(())
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(Error::not_found)
}

/// Products in creation order.
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

fn validate_price(price: f64) -> Result<(), Error> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::validation(
            "price",
            "price must be a finite number greater than or equal to 0",
        ));
    }
    Ok(())
}

async fn ensure_category_exists(db: &DatabaseConnection, category_id: Id) -> Result<(), Error> {
    if categories::Entity::find_by_id(category_id)
        .one(db)
        .await?
        .is_none()
    {
        debug!("Category with id {} not found", category_id);
        return Err(Error::validation(
            "category_id",
            format!("category {category_id} does not exist"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category;
    use crate::error::EntityApiErrorKind;
    use crate::test_support;

    async fn seed_category(db: &DatabaseConnection, name: &str) -> categories::Model {
        let now = chrono::Utc::now();
        category::create(
            db,
            categories::Model {
                id: 0,
                name: name.to_owned(),
                description: None,
                created_at: now.into(),
                updated_at: now.into(),
            },
        )
        .await
        .unwrap()
    }

    fn new_product(name: &str, price: f64, category_id: Id) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: 0,
            name: name.to_owned(),
            description: Some("Stainless steel".to_owned()),
            price,
            category_id,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn validation_field(error: Error) -> String {
        match error.error_kind {
            EntityApiErrorKind::ValidationError { field, .. } => field,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_persists_product_in_existing_category() -> Result<(), Error> {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;

        let product = create(&db, new_product("Kettle", 24.5, kitchen.id)).await?;

        assert!(product.id > 0);
        assert_eq!(product.category_id, kitchen.id);
        assert_eq!(product.price, 24.5);
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(find_by_id(&db, product.id).await?, product);

        Ok(())
    }

    #[tokio::test]
    async fn create_accepts_zero_price() -> Result<(), Error> {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;

        let product = create(&db, new_product("Sample", 0.0, kitchen.id)).await?;

        assert_eq!(product.price, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields_without_persisting() {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;

        let cases = [
            (new_product("", 1.0, kitchen.id), "name"),
            (new_product("Pan", -0.01, kitchen.id), "price"),
            (new_product("Pan", f64::NAN, kitchen.id), "price"),
            (new_product("Pan", f64::INFINITY, kitchen.id), "price"),
            (new_product("Pan", 1.0, kitchen.id + 100), "category_id"),
        ];

        for (model, field) in cases {
            let error = create(&db, model).await.unwrap_err();
            assert_eq!(validation_field(error), field);
        }

        assert!(find_page(&db, 0, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_only_present_fields() -> Result<(), Error> {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;
        let product = create(&db, new_product("Kettle", 24.5, kitchen.id)).await?;

        let updated = update(
            &db,
            product.id,
            Changes {
                price: Some(19.99),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.price, 19.99);
        assert_eq!(updated.name, product.name);
        assert_eq!(updated.description, product.description);
        assert_eq!(updated.category_id, product.category_id);
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at >= updated.created_at);

        let cleared = update(
            &db,
            product.id,
            Changes {
                description: Some(None),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(cleared.description, None);
        assert_eq!(cleared.price, 19.99);

        Ok(())
    }

    #[tokio::test]
    async fn update_moves_product_between_existing_categories_only() -> Result<(), Error> {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;
        let garden = seed_category(&db, "Garden").await;
        let product = create(&db, new_product("Watering Can", 9.0, kitchen.id)).await?;

        let moved = update(
            &db,
            product.id,
            Changes {
                category_id: Some(garden.id),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(moved.category_id, garden.id);

        let error = update(
            &db,
            product.id,
            Changes {
                category_id: Some(garden.id + 100),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(validation_field(error), "category_id");
        assert_eq!(find_by_id(&db, product.id).await?.category_id, garden.id);

        Ok(())
    }

    #[tokio::test]
    async fn missing_product_is_not_found_for_every_operation() {
        let db = test_support::database().await;

        assert_eq!(
            find_by_id(&db, 1).await.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
        assert_eq!(
            update(&db, 1, Changes::default()).await.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
        assert_eq!(
            delete_by_id(&db, 1).await.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
    }

    #[tokio::test]
    async fn delete_removes_product() -> Result<(), Error> {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;
        let product = create(&db, new_product("Kettle", 24.5, kitchen.id)).await?;

        delete_by_id(&db, product.id).await?;

        assert_eq!(
            find_by_id(&db, product.id).await.unwrap_err().error_kind,
            EntityApiErrorKind::RecordNotFound
        );
        Ok(())
    }

    #[tokio::test]
    async fn delete_of_missing_product_leaves_others_in_place() -> Result<(), Error> {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;
        let mut ids = Vec::new();
        for name in ["Kettle", "Pan", "Whisk"] {
            ids.push(create(&db, new_product(name, 5.0, kitchen.id)).await?.id);
        }
        let missing = ids.iter().max().copied().unwrap_or_default() + 1;

        let error = delete_by_id(&db, missing).await.unwrap_err();

        assert_eq!(error.error_kind, EntityApiErrorKind::RecordNotFound);
        let remaining: Vec<Id> = find_page(&db, 0, 10).await?.into_iter().map(|p| p.id).collect();
        assert_eq!(remaining, ids);
        Ok(())
    }

    #[tokio::test]
    async fn find_page_lists_products_in_creation_order() -> Result<(), Error> {
        let db = test_support::database().await;
        let kitchen = seed_category(&db, "Kitchen").await;
        for name in ["Kettle", "Pan", "Whisk"] {
            create(&db, new_product(name, 5.0, kitchen.id)).await?;
        }

        let page = find_page(&db, 1, 5).await?;

        assert_eq!(
            page.into_iter().map(|p| p.name).collect::<Vec<_>>(),
            ["Pan", "Whisk"]
        );
        Ok(())
    }
}
