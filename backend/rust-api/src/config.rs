use std::env;
use std::time::Duration;

/// Where the catalog lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub event_interval: Duration,
    pub random_seed: Option<u64>,
    pub seed_demo_data: bool,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8081,
            store_backend: StoreBackend::Memory,
            database_url: None,
            event_interval: Duration::from_secs(1),
            random_seed: None,
            seed_demo_data: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let backend = lookup("STORE_BACKEND").map(|v| v.trim().to_lowercase());
        let store_backend = match backend.as_deref() {
            None | Some("") | Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres,
            Some(other) => anyhow::bail!("Unknown STORE_BACKEND '{}' (expected memory or postgres)", other),
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORE_BACKEND=postgres");
        }

        let event_interval_ms: u64 = lookup("EVENT_INTERVAL_MS")
            .and_then(|v| v.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.event_interval.as_millis() as u64);

        Ok(Self {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            store_backend,
            database_url,
            event_interval: Duration::from_millis(event_interval_ms),
            random_seed: lookup("RANDOM_SEED").and_then(|v| v.parse().ok()),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(defaults.seed_demo_data),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }
}
