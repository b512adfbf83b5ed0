use clap::Parser;

use fluxflix_client::poller::{self, PollerOptions};
use fluxflix_client::CatalogClient;

/// Follows the viewing events of every catalog movie whose title matches.
#[derive(Parser, Debug)]
#[command(name = "fluxflix-client", version)]
struct Args {
    /// Base URL of the catalog service
    #[arg(long, env = "FLUXFLIX_URL", default_value = "http://localhost:8081")]
    base_url: String,

    /// Case-insensitive title substring
    #[arg(long, default_value = "silence")]
    title_filter: String,

    /// Stop after this many events per movie
    #[arg(long)]
    max_events: Option<usize>,

    /// Catalog fetch attempts before giving up
    #[arg(long, default_value_t = 10)]
    max_attempts: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fluxflix_client=info".into()),
        )
        .init();

    let args = Args::parse();
    let client = CatalogClient::new(args.base_url)?;

    let options = PollerOptions {
        title_filter: args.title_filter,
        max_events: args.max_events,
        max_attempts: args.max_attempts,
        ..PollerOptions::default()
    };

    let total = poller::run(&client, options, |event| println!("{}", event)).await?;
    log::info!("Done after {} events", total);
    Ok(())
}
