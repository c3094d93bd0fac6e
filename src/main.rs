//! Choropleth Store - loads both datasets and prints the binned records
//! for the configured year as JSON.

use anyhow::{Context, Result};
use choropleth_store::config::DEFAULT_CONFIG_FILE;
use choropleth_store::{ChoroplethStore, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let config_path = std::env::var("CHOROPLETH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("choropleth_store={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Choropleth Store v{}", env!("CARGO_PKG_VERSION"));

    let mut store = ChoroplethStore::from_config(&config);
    store
        .load_data(&config.data)
        .context("failed to load income/education tables")?;

    let view = store.derive();
    tracing::info!(
        year = view.year,
        joined = view.joined.len(),
        "Derived binned records"
    );

    println!("{}", serde_json::to_string_pretty(&view.binned)?);
    Ok(())
}
