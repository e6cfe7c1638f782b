pub mod api_models;
pub mod db;
pub mod error;
mod handlers;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use sqlx::{Pool, Postgres};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn app(pool: Pool<Postgres>) -> Router {
    Router::new()
        .route("/", get(handlers::read_root))
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/locations", get(handlers::get_locations))
        .with_state(pool)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
