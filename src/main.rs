//! samplecmd binary: argument parsing, tracing setup, and one search run.

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use samplecmd::cli::Cli;
use samplecmd::{Aggregator, DescriptorStore, HttpFetcher, output};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Diagnostics go to stderr so results stay pipeable; per-site skips are
    // warn-level and visible by default.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    debug!(?args.keyword, args.limit, "Parsed CLI arguments");

    let mut site_dirs = DescriptorStore::default_dirs();
    if let Some(extra) = args.sites_dir.clone() {
        site_dirs.push(extra);
    }

    // The only unrecoverable failure: no descriptor store at all.
    let store = DescriptorStore::load(&site_dirs)?;
    info!(sites = store.len(), "Loaded site descriptors");

    let fetcher = HttpFetcher::new()?;
    let aggregator = Aggregator::new(store, fetcher);

    let mut rng = rand::rng();
    let records = aggregator
        .run(&args.keyword, args.limit, &mut rng)
        .await;

    output::render(&records, args.show_description, args.show_source_links);
    Ok(())
}
