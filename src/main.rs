use std::str::FromStr;
use std::sync::Arc;

use player_api::config::Config;
use player_api::messages::BundleMessageSource;
use player_api::service::SqlitePlayerService;
use player_api::state::AppState;
use player_api::db;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting player api server...");

    let config = Config::from_env().expect("Invalid configuration");

    // Create database connection pool
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("DATABASE_URL is not a valid SQLite URL")
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options)
        .await
        .expect("Failed to connect to database");

    db::init_schema(&pool)
        .await
        .expect("Failed to create database schema");

    tracing::info!("Database connection established.");

    let mut messages = BundleMessageSource::with_defaults();
    if let Some(dir) = &config.messages_dir {
        let loaded = messages
            .load_dir(dir)
            .expect("Failed to load message bundles");
        tracing::info!("Loaded {} message bundle(s) from {:?}", loaded, dir);
    }

    let state = AppState::new(
        Arc::new(SqlitePlayerService::new(pool)),
        Arc::new(messages),
    );
    let app = player_api::app(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
