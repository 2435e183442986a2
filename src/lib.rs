pub mod config;
pub mod db;
pub mod error;
pub mod messages;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod validation;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router with all routes and middleware
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Player API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route(
            "/api/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )
        .route(
            "/api/players/{id}",
            get(routes::players::get_player_by_id)
                .put(routes::players::update_player_by_id)
                .delete(routes::players::delete_player_by_id),
        )

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
