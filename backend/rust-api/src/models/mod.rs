//! Shared types: movies and the viewing events streamed for them.

pub mod movie;

pub use movie::{Movie, ViewingEvent, GENRES, USERS};
