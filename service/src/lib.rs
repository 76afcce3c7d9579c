use config::Config;
use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use tokio::time::Duration;

pub mod config;
pub mod logging;

pub async fn init_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let opt = connect_options(config);

    let scheme = config.database_url().split(':').next().unwrap_or_default();
    info!(
        "Connecting to {scheme} database with max_connections={:?}, min_connections={:?}",
        opt.get_max_connections(),
        opt.get_min_connections(),
    );

    Database::connect(opt).await
}

/// Pool options for the configured URL.
///
/// An in-memory SQLite database lives and dies with its connection, so such a
/// pool holds exactly one connection that is never recycled.
fn connect_options(config: &Config) -> ConnectOptions {
    let url = config.database_url();
    let mut opt = ConnectOptions::new(url);
    opt.connect_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    if is_in_memory_sqlite(url) {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(config.db_max_connections)
            .min_connections(config.db_min_connections)
            .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime_secs));
    }

    opt
}

fn is_in_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || (url.starts_with("sqlite:") && url.contains("mode=memory"))
}

// Shared by every request handler. Clone is cheap: the connection is behind an Arc.
#[derive(Clone)]
pub struct AppState {
    pub database_connection: Arc<DatabaseConnection>,
    pub config: Config,
}

impl AppState {
    pub fn new(app_config: Config, db: &Arc<DatabaseConnection>) -> Self {
        Self {
            database_connection: Arc::clone(db),
            config: app_config,
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        self.database_connection.as_ref()
    }
}
