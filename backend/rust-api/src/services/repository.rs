//! Catalog store adapters. The catalog only ever needs a full scan, an exact-id
//! lookup and an upsert, so any document store that offers those will do.

use async_trait::async_trait;
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::database::DatabasePool;
use crate::error::CatalogError;
use crate::models::Movie;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Every stored movie, in store-defined order.
    async fn find_all(&self) -> Result<Vec<Movie>, CatalogError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, CatalogError>;

    /// Stores the movie, replacing any record with the same id.
    async fn insert(&self, movie: Movie) -> Result<(), CatalogError>;
}

/// Process-local store. Keeps insertion order.
#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let mut stored: Vec<Movie> = Vec::new();
        for movie in movies {
            upsert(&mut stored, movie);
        }
        Self {
            movies: RwLock::new(stored),
        }
    }
}

fn upsert(movies: &mut Vec<Movie>, movie: Movie) {
    match movies.iter_mut().find(|existing| existing.id == movie.id) {
        Some(existing) => *existing = movie,
        None => movies.push(movie),
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_all(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(self.movies.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, CatalogError> {
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .find(|movie| movie.id == id)
            .cloned())
    }

    async fn insert(&self, movie: Movie) -> Result<(), CatalogError> {
        upsert(&mut *self.movies.write().await, movie);
        Ok(())
    }
}

/// PostgreSQL store: one JSONB document per movie in the `movies` table.
pub struct PgMovieRepository {
    pool: DatabasePool,
}

impl PgMovieRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepository {
    async fn find_all(&self) -> Result<Vec<Movie>, CatalogError> {
        let documents = sqlx::query_scalar::<_, Json<Movie>>(
            "SELECT document FROM movies ORDER BY created_at, id",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Error scanning movies: {:?}", e);
            CatalogError::from(e)
        })?;

        Ok(documents.into_iter().map(|Json(movie)| movie).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, CatalogError> {
        let document = sqlx::query_scalar::<_, Json<Movie>>(
            "SELECT document FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching movie {}: {:?}", id, e);
            CatalogError::from(e)
        })?;

        Ok(document.map(|Json(movie)| movie))
    }

    async fn insert(&self, movie: Movie) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            INSERT INTO movies (id, document)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET document = EXCLUDED.document
            "#,
        )
        .bind(movie.id.clone())
        .bind(Json(movie))
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Error inserting movie: {:?}", e);
            CatalogError::from(e)
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_replaces_by_id_and_keeps_order() {
        let repo = InMemoryMovieRepository::new();
        repo.insert(Movie::new("a", "Aeon Flux", "horror")).await.unwrap();
        repo.insert(Movie::new("b", "The Fluximator", "comedy")).await.unwrap();
        repo.insert(Movie::new("a", "Aeon Flux", "drama")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(
            all,
            vec![
                Movie::new("a", "Aeon Flux", "drama"),
                Movie::new("b", "The Fluximator", "comedy"),
            ]
        );
    }

    #[tokio::test]
    async fn lookup_is_exact() {
        let repo = InMemoryMovieRepository::with_movies([Movie::new("m1", "Silence of the Lambdas", "drama")]);

        assert!(repo.find_by_id("m1").await.unwrap().is_some());
        assert!(repo.find_by_id("M1").await.unwrap().is_none());
        assert!(repo.find_by_id("m").await.unwrap().is_none());
        assert!(repo.find_by_id("").await.unwrap().is_none());
    }
}
