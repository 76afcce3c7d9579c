use events::EventPublisher;
use log::*;
use migration::{Migrator, MigratorTrait};
use service::{config::Config, logging::Logger, AppState};
use std::process;
use std::sync::Arc;
use ws::domain_event_handler::WsDomainEventHandler;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!(
        "Starting up the storefront ({} environment)...",
        config.runtime_env()
    );

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to connect to the database: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(db.as_ref(), None).await {
        error!("Failed to apply database migrations: {e}");
        process::exit(1);
    }

    let ws_manager = Arc::new(ws::Manager::new(config.ws_channel_capacity));
    let event_publisher = EventPublisher::new()
        .with_handler(Arc::new(WsDomainEventHandler::new(Arc::clone(&ws_manager))));

    let app_state = web::AppState::new(
        AppState::new(config, &db),
        Arc::new(event_publisher),
        ws_manager,
    );

    if let Err(e) = web::init_server(app_state).await {
        error!("Server stopped: {e}");
        process::exit(1);
    }
}
