pub mod movies;

pub use movies::{get_movie, list_movies, stream_movie_events, ApiError};
