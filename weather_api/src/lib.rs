pub mod api;
pub mod coordinate;
pub mod live;
pub mod nws;
pub mod state;

use crate::api::error::handle_panic;
use crate::state::AppState;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

/// Assembles the service: the HTML page at `/`, the JSON API under `/api` and a health check.
pub fn app(state: AppState, template_path: &str) -> Router {
    Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route_service("/", ServeFile::new(template_path))
        .nest("/api", api::router())
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
