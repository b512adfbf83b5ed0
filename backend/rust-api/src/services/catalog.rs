use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::CatalogError;
use crate::models::Movie;
use crate::services::event_stream::ViewingEventStream;
use crate::services::random::RandomSource;
use crate::services::repository::MovieRepository;

/// Catalog business logic. Holds no catalog state of its own; every read goes
/// to the store and store errors are passed through untouched.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn MovieRepository>,
    event_interval: Duration,
    random: RandomSource,
    active_streams: Arc<AtomicUsize>,
}

impl CatalogService {
    pub fn new(
        repository: Arc<dyn MovieRepository>,
        event_interval: Duration,
        random: RandomSource,
    ) -> Self {
        Self {
            repository,
            event_interval,
            random,
            active_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Movie>, CatalogError> {
        self.repository.find_all().await
    }

    /// Exact-id lookup. Anything the store does not hold, including an empty
    /// id, is `NotFound`.
    pub async fn get_by_id(&self, id: &str) -> Result<Movie, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Opens a paced event stream for an already-resolved movie.
    pub fn stream_events(&self, movie: Movie) -> ViewingEventStream {
        ViewingEventStream::new(
            movie,
            self.event_interval,
            self.random.rng(),
            self.active_streams.clone(),
        )
    }

    /// Resolves the movie first so a missing id fails before anything is streamed.
    pub async fn stream_events_by_id(&self, id: &str) -> Result<ViewingEventStream, CatalogError> {
        let movie = self.get_by_id(id).await?;
        Ok(self.stream_events(movie))
    }

    /// Number of event streams currently open.
    pub fn active_streams(&self) -> usize {
        self.active_streams.load(Ordering::SeqCst)
    }

    pub fn event_interval(&self) -> Duration {
        self.event_interval
    }
}
