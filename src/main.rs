use chrono::Local;
use dotenvy::dotenv;
use order_management::{
    api::{self, AppState},
    config::{database, settings},
    core::seed,
    errors::Result,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = settings::load_app_configuration("config.toml")
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Connect and make sure the tables exist
    let url = database::resolve_database_url(&app_config.database)?;
    let db = database::create_connection(&url, &app_config.database)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;

    // 5. Seed demo data into an empty store
    if app_config.database.seed_on_startup {
        seed::seed_if_empty(&db, Local::now().date_naive())
            .await
            .inspect(|summary| {
                info!(
                    products = summary.products,
                    orders = summary.orders,
                    "Seed step finished."
                );
            })
            .inspect_err(|e| error!("Failed to seed demo data: {e}"))?;
    }

    // 6. Serve the HTTP API
    let address = app_config
        .server
        .bind_address
        .parse::<SocketAddr>()
        .inspect_err(|e| error!("Invalid bind address: {e}"))?;
    let listener = TcpListener::bind(address)
        .await
        .inspect_err(|e| error!("Failed to bind {address}: {e}"))?;
    let state = AppState::new(db, app_config.server.default_page_size);
    api::serve(listener, api::router(state)).await
}
