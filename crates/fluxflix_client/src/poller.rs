//! The demo consumer: find movies by title, then follow each one's event stream.

use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinSet;

use crate::api::CatalogClient;
use crate::backoff::Backoff;
use crate::error::ClientError;
use crate::models::{Movie, MovieEvent};

pub struct PollerOptions {
    /// Case-insensitive substring a title must contain.
    pub title_filter: String,
    /// Events to take per movie; `None` follows forever.
    pub max_events: Option<usize>,
    /// Catalog fetch attempts before giving up.
    pub max_attempts: usize,
    pub backoff: Backoff,
}

impl Default for PollerOptions {
    fn default() -> Self {
        Self {
            title_filter: "silence".to_string(),
            max_events: None,
            max_attempts: 10,
            backoff: Backoff::default(),
        }
    }
}

pub fn matching(movies: Vec<Movie>, title_filter: &str) -> Vec<Movie> {
    let needle = title_filter.to_lowercase();
    movies
        .into_iter()
        .filter(|movie| movie.title.to_lowercase().contains(&needle))
        .collect()
}

/// Lists the catalog, retrying while the service is unreachable.
pub async fn fetch_catalog(
    client: &CatalogClient,
    backoff: &mut Backoff,
    max_attempts: usize,
) -> Result<Vec<Movie>, ClientError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        match client.movies().await {
            Ok(movies) => {
                backoff.reset();
                return Ok(movies);
            }
            Err(e) if attempt >= max_attempts.max(1) => {
                return Err(ClientError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(e),
                });
            }
            Err(e) => {
                let delay = backoff.on_failure();
                log::warn!(
                    "Catalog fetch failed (attempt {}): {}. Retrying in {:?}",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Follows one movie's events until the stream ends or `max_events` is reached.
pub async fn follow(
    client: &CatalogClient,
    movie: &Movie,
    max_events: Option<usize>,
    on_event: &(dyn Fn(&MovieEvent) + Send + Sync),
) -> Result<usize, ClientError> {
    let events = client.events(&movie.id).await?;
    let mut events = Box::pin(match max_events {
        Some(n) => events.take(n).left_stream(),
        None => events.right_stream(),
    });

    let mut seen = 0;
    while let Some(event) = events.next().await {
        on_event(&event?);
        seen += 1;
    }
    log::info!("Event stream for '{}' ended after {} events", movie.title, seen);
    Ok(seen)
}

/// Runs the poller end to end and returns how many events were handled.
pub async fn run<F>(
    client: &CatalogClient,
    mut options: PollerOptions,
    on_event: F,
) -> Result<usize, ClientError>
where
    F: Fn(&MovieEvent) + Send + Sync + 'static,
{
    let movies = fetch_catalog(client, &mut options.backoff, options.max_attempts).await?;
    let targets = matching(movies, &options.title_filter);
    if targets.is_empty() {
        log::warn!("No movie title contains '{}'", options.title_filter);
        return Ok(0);
    }

    let on_event = Arc::new(on_event);
    let mut tasks = JoinSet::new();
    for movie in targets {
        log::info!("Following '{}' ({})", movie.title, movie.id);
        let client = client.clone();
        let on_event = on_event.clone();
        let max_events = options.max_events;
        tasks.spawn(async move {
            follow(&client, &movie, max_events, on_event.as_ref()).await
        });
    }

    let mut total = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(seen)) => total += seen,
            Ok(Err(e)) => log::error!("Event stream failed: {}", e),
            Err(e) => log::error!("Event stream task panicked: {}", e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_filter_is_case_insensitive() {
        let movies = vec![
            Movie { id: "1".into(), title: "Silence of the Lambdas".into(), genre: "drama".into() },
            Movie { id: "2".into(), title: "Aeon Flux".into(), genre: "horror".into() },
            Movie { id: "3".into(), title: "The SILENCE".into(), genre: "comedy".into() },
        ];
        let ids: Vec<String> = matching(movies, "Silence").into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
