//! HTTP client for the catalog service.
use std::time::Duration;

use futures::{Stream, StreamExt};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::error::ClientError;
use crate::models::{Movie, MovieEvent};
use crate::sse::SseDecoder;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// No overall client timeout: event streams are meant to stay open.
    /// Finite requests get `REQUEST_TIMEOUT` each.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn movie_url(&self, id: &str) -> String {
        format!("{}/movies/{}", self.base_url, urlencoding::encode(id))
    }

    /// GET /movies
    pub async fn movies(&self) -> Result<Vec<Movie>, ClientError> {
        let url = format!("{}/movies", self.base_url);
        let resp = self.http.get(&url).timeout(REQUEST_TIMEOUT).send().await?;
        let resp = ensure_success(resp, "").await?;
        Ok(resp.json().await?)
    }

    /// GET /movies/{id}; `None` when the service answers 404.
    pub async fn movie(&self, id: &str) -> Result<Option<Movie>, ClientError> {
        let resp = self
            .http
            .get(self.movie_url(id))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        match ensure_success(resp, id).await {
            Ok(resp) => Ok(Some(resp.json().await?)),
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// GET /movies/{id}/events as a stream of decoded events. Ends when the
    /// service closes the connection; dropping it disconnects.
    pub async fn events(
        &self,
        id: &str,
    ) -> Result<impl Stream<Item = Result<MovieEvent, ClientError>>, ClientError> {
        let url = format!("{}/events", self.movie_url(id));
        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await?;
        let resp = ensure_success(resp, id).await?;
        log::info!("Subscribed to events for movie {}", id);

        let chunks = Box::pin(resp.bytes_stream());
        Ok(futures::stream::unfold(
            (chunks, SseDecoder::default()),
            |(mut chunks, mut decoder)| async move {
                loop {
                    if let Some(data) = decoder.next_data() {
                        let event = serde_json::from_str::<MovieEvent>(&data).map_err(ClientError::from);
                        return Some((event, (chunks, decoder)));
                    }
                    match chunks.next().await {
                        Some(Ok(chunk)) => decoder.push(&chunk),
                        Some(Err(e)) => return Some((Err(ClientError::from(e)), (chunks, decoder))),
                        None => return None,
                    }
                }
            },
        ))
    }
}

async fn ensure_success(resp: reqwest::Response, id: &str) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(id.to_string()));
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}
