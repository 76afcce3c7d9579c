use crate::controller::{category_controller, health_check_controller, product_controller};
use crate::websocket::handler::ws_handler;
use crate::{params, AppState};
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Storefront API"
        ),
        paths(
            category_controller::create,
            category_controller::index,
            category_controller::read,
            category_controller::update,
            category_controller::delete,
            product_controller::create,
            product_controller::index,
            product_controller::read,
            product_controller::update,
            product_controller::delete,
            health_check_controller::health_check,
        ),
        components(
            schemas(
                domain::categories::Model,
                domain::products::Model,
                params::category::UpdateParams,
                params::product::UpdateParams,
            )
        ),
        tags(
            (name = "storefront", description = "Products, categories and live catalog notifications")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(category_routes(app_state.clone()))
        .merge(product_routes(app_state.clone()))
        .merge(ws_routes(app_state))
        .merge(health_routes())
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn category_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/categories",
            post(category_controller::create).get(category_controller::index),
        )
        .route(
            "/categories/{id}",
            get(category_controller::read)
                .patch(category_controller::update)
                .delete(category_controller::delete),
        )
        .with_state(app_state)
}

fn product_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            post(product_controller::create).get(product_controller::index),
        )
        .route(
            "/products/{id}",
            get(product_controller::read)
                .patch(product_controller::update)
                .delete(product_controller::delete),
        )
        .with_state(app_state)
}

fn ws_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/ws/{client_id}", get(ws_handler))
        .with_state(app_state)
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}
