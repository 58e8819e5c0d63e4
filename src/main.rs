//! # Crawl Pipeline
//!
//! A thin orchestration layer for a media-monitoring crawl: it sequences the
//! external scope parser and the Twitter/domain crawlers, and bundles the
//! standalone metadata extractor the downstream date processor shells out to.
//!
//! ## Usage
//!
//! ```sh
//! # Full pipeline: scope parse, then both crawlers in parallel
//! crawl_pipeline run
//!
//! # A single crawl branch against CSVs already on disk
//! crawl_pipeline run --mode twitter-only
//!
//! # One-shot metadata report for a URL
//! crawl_pipeline extract https://example.com/story
//! ```
//!
//! ## Architecture
//!
//! The pipeline is a fixed sequence of external-process spawns gated by the
//! scope parser's exit code:
//! 1. **Scope parse** (blocking): split the input CSV into `domain.csv` and
//!    `twitter.csv`; a failure here halts everything downstream
//! 2. **Crawling** (parallel): stream the Twitter and domain crawlers'
//!    output into the log until both branches finish
//! 3. **Extraction** (independent): fetch one URL and print the delimited
//!    metadata/readability report consumed positionally downstream

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod extract;
mod invoker;
mod models;
mod pipeline;
mod records;
mod utils;

use cli::{Cli, Command};
use config::PipelineConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Run { mode } => {
            info!(?mode, "crawl_pipeline starting up");
            let config = PipelineConfig::load(args.config.as_deref().map(Path::new))?;
            debug!(?config, "Pipeline configuration");
            pipeline::run(&config, mode).await?;
        }
        Command::Extract { url } => {
            extract::run(&url).await;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
