use crate::controller::{ApiResponse, DeleteResponse};
use crate::error::WithResource;
use crate::params::product::UpdateParams;
use crate::params::page::IndexParams;
use crate::extract::{Json, Path, Query};
use crate::{AppState, Error};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use domain::product as ProductApi;
use domain::{products::Model, Id};

use log::*;

const RESOURCE: &str = "Product";

/// POST create a new Product
#[utoipa::path(
    post,
    path = "/products",
    request_body = domain::products::Model,
    responses(
        (status = 201, description = "Successfully Created a New Product", body = domain::products::Model),
        (status = 422, description = "Invalid field or unknown category_id"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    Json(product_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a New Product from: {product_model:?}");

    let product = ProductApi::create(
        app_state.db_conn_ref(),
        app_state.event_publisher.as_ref(),
        product_model,
    )
    .await?;

    debug!("New Product: {product:?}");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(StatusCode::CREATED.into(), product)),
    ))
}

/// GET a page of Products in creation order
#[utoipa::path(
    get,
    path = "/products",
    params(IndexParams),
    responses(
        (status = 200, description = "Successfully retrieved Products", body = [domain::products::Model]),
        (status = 422, description = "Invalid paging parameters"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Products with params: {params:?}");

    let (skip, limit) = params.bounds()?;
    let products = ProductApi::find_page(app_state.db_conn_ref(), skip, limit).await?;

    debug!("Found {} Products", products.len());

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), products)))
}

/// GET a particular Product specified by its id.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = Id, Path, description = "Product id to retrieve")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a specific Product by its id", body = domain::products::Model),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Product by id: {id}");

    let product = ProductApi::find_by_id(app_state.db_conn_ref(), id)
        .await
        .with_resource(RESOURCE)?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), product)))
}

/// PATCH the supplied fields of a Product
#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(
        ("id" = Id, Path, description = "Id of the Product to update"),
    ),
    request_body = crate::params::product::UpdateParams,
    responses(
        (status = 200, description = "Successfully Updated Product", body = domain::products::Model),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Invalid field or unknown category_id"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("PATCH Update Product with id: {id} from: {params:?}");

    let product = ProductApi::update(
        app_state.db_conn_ref(),
        app_state.event_publisher.as_ref(),
        id,
        params.into(),
    )
    .await
    .with_resource(RESOURCE)?;

    debug!("Updated Product: {product:?}");

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), product)))
}

/// DELETE a Product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = Id, Path, description = "Id of the Product to delete"),
    ),
    responses(
        (status = 200, description = "Successfully Deleted Product"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("DELETE Product by id: {id}");

    ProductApi::delete_by_id(
        app_state.db_conn_ref(),
        app_state.event_publisher.as_ref(),
        id,
    )
    .await
    .with_resource(RESOURCE)?;

    Ok(Json(DeleteResponse {
        id,
        message: "Product deleted",
    }))
}
