use crate::controller::{ApiResponse, DeleteResponse};
use crate::error::WithResource;
use crate::params::category::UpdateParams;
use crate::params::page::IndexParams;
use crate::extract::{Json, Path, Query};
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use domain::category as CategoryApi;
use domain::{categories::Model, Id};

use log::*;

const RESOURCE: &str = "Product category";

/// POST create a new Category
#[utoipa::path(
    post,
    path = "/categories",
    request_body = domain::categories::Model,
    responses(
        (status = 201, description = "Successfully Created a New Category", body = domain::categories::Model),
        (status = 409, description = "Category name already in use"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(category_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Category from: {category_model:?}");

    let category = CategoryApi::create(
        app_state.db_conn_ref(),
        app_state.event_publisher.as_ref(),
        category_model,
    )
    .await?;

    debug!("New Category: {category:?}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED.into(), category)),
    ))
}

/// GET a page of Categories in creation order
#[utoipa::path(
    get,
    path = "/categories",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved Categories", body = [domain::categories::Model]),
        (status = 422, description = "Invalid paging parameters"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Categories with params: {params:?}");

    let (skip, limit) = params.bounds()?;
    let categories = CategoryApi::find_page(app_state.db_conn_ref(), skip, limit).await?;

    debug!("Found {} Categories", categories.len());

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), categories)))
}

/// GET a particular Category specified by its id.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = Id, Path, description = "Category id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Category by its id", body = domain::categories::Model),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Category by id: {id}");

    let category = CategoryApi::find_by_id(app_state.db_conn_ref(), id)
        .await
        .with_resource(RESOURCE)?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), category)))
}

/// PATCH the supplied fields of a Category
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    params(
        ("id" = Id, Path, description = "Id of the Category to update"),
    ),
    request_body = crate::params::category::UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Category", body = domain::categories::Model),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category name already in use"),
        (status = 422, description = "Unprocessable Entity"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PATCH Update Category with id: {id} from: {params:?}");

    let category = CategoryApi::update(
        app_state.db_conn_ref(),
        app_state.event_publisher.as_ref(),
        id,
        params.into(),
    )
    .await
    .with_resource(RESOURCE)?;

    debug!("Updated Category: {category:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), category)))
}

/// DELETE a Category that no product refers to
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = Id, Path, description = "Id of the Category to delete"),
    ),
    responses(
        (status = 200, description = "Successfully Deleted Category"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is still referenced by products"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Category by id: {id}");

    CategoryApi::delete_by_id(
        app_state.db_conn_ref(),
        app_state.event_publisher.as_ref(),
        id,
    )
    .await
    .with_resource(RESOURCE)?;

    Ok(Json(DeleteResponse {
        id,
        message: "Product category deleted",
    }))
}
