// Shared setup for the API tests: an in-memory catalog behind the real router.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

use fluxflix_service::models::Movie;
use fluxflix_service::services::random::RandomSource;
use fluxflix_service::services::{CatalogService, InMemoryMovieRepository, MovieRepository};
use fluxflix_service::{create_router, AppState, CatalogError};

pub const INTERVAL: Duration = Duration::from_secs(1);

pub fn lambdas() -> Movie {
    Movie::new("m1", "Silence of the Lambdas", "drama")
}

pub fn demo_movies() -> Vec<Movie> {
    vec![
        lambdas(),
        Movie::new("m2", "Aeon Flux", "horror"),
        Movie::new("m3", "Enter the Mono<Void>", "comedy"),
    ]
}

pub fn catalog_over(repository: impl MovieRepository + 'static) -> CatalogService {
    CatalogService::new(Arc::new(repository), INTERVAL, RandomSource::seeded(42))
}

pub fn catalog_with(movies: Vec<Movie>) -> CatalogService {
    catalog_over(InMemoryMovieRepository::with_movies(movies))
}

pub fn app_for(catalog: CatalogService) -> Router {
    create_router(AppState::new(catalog))
}

/// Store whose every read fails, as if the database were down.
pub struct UnreachableStore;

#[async_trait]
impl MovieRepository for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<Movie>, CatalogError> {
        Err(CatalogError::StoreUnavailable("connection refused".into()))
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Movie>, CatalogError> {
        Err(CatalogError::StoreUnavailable("connection refused".into()))
    }

    async fn insert(&self, _movie: Movie) -> Result<(), CatalogError> {
        Err(CatalogError::StoreUnavailable("connection refused".into()))
    }
}
