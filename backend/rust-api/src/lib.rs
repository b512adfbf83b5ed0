// Library root - the binary and the tests both build on these modules

pub mod app_state;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod startup;

pub use app_state::AppState;
pub use config::Config;
pub use error::CatalogError;
pub use router::create_router;
pub use startup::prepare;
