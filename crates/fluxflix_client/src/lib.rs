//! Client for the FluxFlix catalog service: typed HTTP calls, an event-stream
//! decoder and the polling consumer used by the `fluxflix-client` binary.

pub mod api;
pub mod backoff;
pub mod error;
pub mod models;
pub mod poller;
pub mod sse;

pub use api::CatalogClient;
pub use error::ClientError;
pub use models::{Movie, MovieEvent};
