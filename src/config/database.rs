//! Database configuration module.
//!
//! This module resolves the connection string, opens the `SeaORM` connection pool
//! and creates the `products` and `orders` tables from the entity definitions.
//! `Schema::create_table_from_entity` carries the unique columns and the
//! restrict-on-delete foreign key over from the entities, so no SQL is written
//! by hand.

use crate::config::settings::DatabaseSettings;
use crate::entities::{Order, Product};
use crate::errors::{Error, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info, instrument};

/// Environment variable holding the connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Picks the connection string: `DATABASE_URL` from the environment wins over
/// `[database].url` from the config file.
///
/// # Errors
/// Returns [`Error::Config`] when neither is set; the service cannot start
/// without a store.
pub fn resolve_database_url(settings: &DatabaseSettings) -> Result<String> {
    resolve_database_url_from(std::env::var(DATABASE_URL_ENV).ok(), settings)
}

fn resolve_database_url_from(env_url: Option<String>, settings: &DatabaseSettings) -> Result<String> {
    env_url
        .filter(|url| !url.trim().is_empty())
        .or_else(|| settings.url.clone().filter(|url| !url.trim().is_empty()))
        .ok_or_else(|| Error::Config {
            message: format!(
                "Connection string not found: set {DATABASE_URL_ENV} or [database].url in config.toml"
            ),
        })
}

/// Opens the connection pool.
#[instrument(skip(settings))]
pub async fn create_connection(url: &str, settings: &DatabaseSettings) -> Result<DatabaseConnection> {
    // Every connection to an in-memory SQLite URL is its own database.
    let max_connections = if url.contains(":memory:") {
        1
    } else {
        settings.max_connections
    };

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(max_connections)
        .sqlx_logging(settings.log_statements)
        .sqlx_logging_level(log::LevelFilter::Debug);

    debug!("Connecting to database");
    Database::connect(options).await.map_err(Into::into)
}

/// Creates the `products` and `orders` tables if they do not exist yet.
///
/// Products are created first because orders reference them.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table = schema.create_table_from_entity(Product);
    product_table.if_not_exists();
    let mut order_table = schema.create_table_from_entity(Order);
    order_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&order_table)).await?;

    info!("Database tables ready.");
    Ok(())
}
