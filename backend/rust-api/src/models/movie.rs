use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Users a simulated viewing can be attributed to.
pub const USERS: [&str; 4] = ["user1", "user2", "user3", "user5"];

/// Genres the seeder assigns at random.
pub const GENRES: [&str; 5] = ["horror", "romance", "comedy", "drama", "documentary"];

/// Catalog record. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genre: String,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genre: genre.into(),
        }
    }
}

/// One simulated viewing of a movie. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewingEvent {
    pub movie: Movie,
    #[serde(rename = "when")]
    pub occurred_on: NaiveDate,
    pub user: String,
}
