use axum::Router;
use std::sync::Arc;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::database;
use crate::services::random::RandomSource;
use crate::services::seed_data::seed_demo_movies;
use crate::services::{CatalogService, InMemoryMovieRepository, MovieRepository, PgMovieRepository};
use crate::{create_router, AppState};

/// Builds the store, seeds it when configured, and returns the router.
///
/// Seeding is awaited here, so any router this returns already serves the
/// full demo catalog.
pub async fn prepare(config: &Config) -> anyhow::Result<Router> {
    let repository: Arc<dyn MovieRepository> = match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory catalog store");
            Arc::new(InMemoryMovieRepository::new())
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
            let db_pool = database::new_pool(url).await?;
            info!("Database connection pool created");
            Arc::new(PgMovieRepository::new(db_pool))
        }
    };

    let random = RandomSource::from_seed(config.random_seed);

    if config.seed_demo_data {
        let seeded = seed_demo_movies(repository.as_ref(), &random).await?;
        info!("Seeded {} demo movies", seeded);
    }

    let catalog = CatalogService::new(repository, config.event_interval, random);
    Ok(create_router(AppState::new(catalog)))
}
