//! txcounty - Texas county demographics from the Census API
//!
//! Looks up one or more counties through a shared in-memory cache and prints
//! population, income and housing figures for each.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use txcounty::cache::CountyCache;
use txcounty::cli::{render_state, Cli, OutputFormat, StartupConfig};
use txcounty::fetch::{CountyFetcher, LivenessToken};
use txcounty::request::RequestExecutor;

/// Installs the log subscriber; RUST_LOG overrides the default level
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "txcounty=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    setup_logging(config.verbose);

    // One cache for the whole process, shared by every fetcher
    let cache = Arc::new(CountyCache::new());
    let executor = RequestExecutor::new();
    let liveness = LivenessToken::new();

    let fetchers: Vec<CountyFetcher> = config
        .counties
        .iter()
        .map(|_| CountyFetcher::new(executor.clone(), cache.clone(), config.census.clone()))
        .collect();

    // Lookups run concurrently; repeated counties are not coalesced
    let results = futures::future::join_all(
        fetchers
            .iter()
            .zip(&config.counties)
            .map(|(fetcher, county)| fetcher.fetch_county(county, &liveness)),
    )
    .await;

    let mut any_not_found = false;
    for ((fetcher, county), result) in fetchers.iter().zip(&config.counties).zip(results) {
        if let Err(e) = result {
            eprintln!("error: {}", e);
            any_not_found = true;
            continue;
        }
        println!("{}", render_state(county, &fetcher.state(), config.output));
    }

    if config.show_stats {
        let stats = cache.stats();
        match config.output {
            OutputFormat::Json => println!("{}", serde_json::to_string(&stats)?),
            OutputFormat::Text => println!(
                "cache: {} entries, ~{} bytes, oldest: {}, newest: {}",
                stats.size,
                stats.approx_byte_size,
                stats.oldest_entry_name.as_deref().unwrap_or("-"),
                stats.newest_entry_name.as_deref().unwrap_or("-")
            ),
        }
    }

    liveness.cancel();

    Ok(if any_not_found {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
