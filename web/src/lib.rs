use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderValue, Method,
};
use domain::events::EventPublisher;
use log::*;
use sea_orm::DatabaseConnection;
use service::config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

mod controller;
mod error;
mod extract;
mod params;
mod router;
mod websocket;

pub use error::{Error, Result};

/// Everything a request handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service_state: service::AppState,
    pub event_publisher: Arc<EventPublisher>,
    pub ws_manager: Arc<ws::Manager>,
}

impl AppState {
    pub fn new(
        service_state: service::AppState,
        event_publisher: Arc<EventPublisher>,
        ws_manager: Arc<ws::Manager>,
    ) -> Self {
        Self {
            service_state,
            event_publisher,
            ws_manager,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.service_state.db_conn_ref()
    }

    pub fn config(&self) -> &Config {
        &self.service_state.config
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let config = app_state.config();
    let listen_addr = format!("{}:{}", config.interface(), config.port);

    let allow_origin = if config.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.allowed_origins.iter().filter_map(|origin| {
            match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                    None
                }
            }
        }))
    };

    info!(
        "Server starting... listening for connections on http://{listen_addr} (allowed origins: {:?})",
        config.allowed_origins
    );

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::DELETE, Method::GET, Method::PATCH, Method::POST])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(allow_origin);

    let listener = TcpListener::bind(&listen_addr).await?;

    axum::serve(listener, router::define_routes(app_state).layer(cors_layer)).await
}
