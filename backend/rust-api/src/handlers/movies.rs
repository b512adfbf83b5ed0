use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, Sse},
        Json,
    },
};
use futures::{Stream, StreamExt};

use crate::error::CatalogError;
use crate::models::Movie;
use crate::AppState;

pub type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(err: CatalogError) -> ApiError {
    match err {
        CatalogError::NotFound(id) => {
            tracing::debug!("Movie {} not found", id);
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "Movie not found"})),
            )
        }
        CatalogError::StoreUnavailable(reason) => {
            tracing::error!("Catalog store unavailable: {}", reason);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"error": "Catalog store unavailable"})),
            )
        }
    }
}

// GET /movies
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.catalog.list_all().await.map_err(api_error)?;
    Ok(Json(movies))
}

// GET /movies/:id
pub async fn get_movie(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.catalog.get_by_id(&id).await.map_err(api_error)?;
    Ok(Json(movie))
}

/// GET /movies/:id/events
///
/// Server-sent events, one `data:` frame per viewing event. The movie is
/// resolved before the response starts, so an unknown id is a plain 404.
/// Client disconnect drops the body and with it the stream's timer.
pub async fn stream_movie_events(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let events = state
        .catalog
        .stream_events_by_id(&id)
        .await
        .map_err(api_error)?;

    tracing::info!(
        "Streaming events for movie {} every {:?}",
        events.movie().id,
        state.catalog.event_interval()
    );

    Ok(Sse::new(events.map(|event| Event::default().json_data(event))))
}
