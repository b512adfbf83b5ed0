pub mod catalog;
pub mod event_stream;
pub mod random;
pub mod repository;
pub mod seed_data;

pub use catalog::CatalogService;
pub use repository::{InMemoryMovieRepository, MovieRepository, PgMovieRepository};
