use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use mongo_echo::{config::Settings, session, store::MongoStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // stdout belongs to the session, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env().context("Failed to load settings")?;

    let store = MongoStore::connect(&settings)
        .await
        .context("Failed to open MongoDB connection")?;

    let stdin = BufReader::new(tokio::io::stdin());
    let report = session::run_to_completion(store, stdin, tokio::io::stdout())
        .await
        .context("Session aborted")?;

    tracing::debug!("Stored {} entries this run", report.inserted);
    Ok(())
}
