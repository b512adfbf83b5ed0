use uuid::Uuid;

use crate::error::CatalogError;
use crate::models::{Movie, GENRES};
use crate::services::random::{pick, RandomSource};
use crate::services::repository::MovieRepository;

pub const DEMO_TITLES: [&str; 8] = [
    "Aeon Flux",
    "Enter the Mono<Void>",
    "The Fluximator",
    "Silence of the Lambdas",
    "Reactive Monos on Plane",
    "Y tu Mono tambien",
    "Attack of the fluxes",
    "Back to the future",
];

/// Inserts the demo catalog with random genres. Returns how many movies were
/// written; a store that already holds movies is left alone.
///
/// Must complete before the server starts accepting requests.
pub async fn seed_demo_movies(
    repository: &dyn MovieRepository,
    random: &RandomSource,
) -> Result<usize, CatalogError> {
    let existing = repository.find_all().await?.len();
    if existing > 0 {
        tracing::info!("Catalog already has {} movies, skipping seed", existing);
        return Ok(0);
    }

    let mut rng = random.rng();
    for title in DEMO_TITLES {
        let movie = Movie::new(Uuid::new_v4().to_string(), title, pick(&mut rng, &GENRES));
        tracing::info!(id = %movie.id, genre = %movie.genre, "Seeding movie '{}'", movie.title);
        repository.insert(movie).await?;
    }

    Ok(DEMO_TITLES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::repository::{InMemoryMovieRepository, MockMovieRepository};

    #[tokio::test]
    async fn seeds_an_empty_store() {
        let repository = InMemoryMovieRepository::new();
        let written = seed_demo_movies(&repository, &RandomSource::seeded(3)).await.unwrap();
        assert_eq!(written, DEMO_TITLES.len());

        let movies = repository.find_all().await.unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, DEMO_TITLES.to_vec());
        for movie in &movies {
            assert!(GENRES.contains(&movie.genre.as_str()));
            assert!(Uuid::parse_str(&movie.id).is_ok());
        }
    }

    #[tokio::test]
    async fn leaves_a_populated_store_alone() {
        let repository =
            InMemoryMovieRepository::with_movies([Movie::new("m1", "Silence of the Lambdas", "drama")]);
        let written = seed_demo_movies(&repository, &RandomSource::seeded(3)).await.unwrap();
        assert_eq!(written, 0);
        assert_eq!(repository.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn insert_failure_aborts_seeding() {
        let mut repository = MockMovieRepository::new();
        repository.expect_find_all().returning(|| Ok(Vec::new()));
        repository
            .expect_insert()
            .times(1)
            .returning(|_| Err(CatalogError::StoreUnavailable("disk full".into())));

        let result = seed_demo_movies(&repository, &RandomSource::seeded(3)).await;
        assert_eq!(result, Err(CatalogError::StoreUnavailable("disk full".into())));
    }
}
