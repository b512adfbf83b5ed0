//! Wire types as the service sends them. Dates are plain calendar dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genre: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEvent {
    pub movie: Movie,
    #[serde(rename = "when")]
    pub occurred_on: NaiveDate,
    pub user: String,
}

impl std::fmt::Display for MovieEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MovieEvent(movie={} [{}], when={}, user={})",
            self.movie.title, self.movie.id, self.occurred_on, self.user
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_event() {
        let event: MovieEvent = serde_json::from_str(
            r#"{"movie":{"id":"m1","title":"Silence of the Lambdas","genre":"drama"},"when":"2024-03-09","user":"user5"}"#,
        )
        .unwrap();
        assert_eq!(event.movie.id, "m1");
        assert_eq!(event.occurred_on, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(event.user, "user5");
        assert_eq!(
            event.to_string(),
            "MovieEvent(movie=Silence of the Lambdas [m1], when=2024-03-09, user=user5)"
        );
    }
}
