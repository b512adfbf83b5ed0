use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security_headers::security_headers_middleware;
use crate::AppState;

/// Catalog endpoints mounted under `prefix`.
fn movie_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(prefix, get(handlers::list_movies))
        .route(&format!("{}/:id", prefix), get(handlers::get_movie))
        .route(&format!("{}/:id/events", prefix), get(handlers::stream_movie_events))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(movie_routes("/movies"))
        // Legacy controller prefix, same handlers.
        .merge(movie_routes("/moviez"))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
