//! Command-line interface definitions for the crawl pipeline.
//!
//! This module defines the CLI arguments and subcommands using the `clap`
//! crate. Which stages run is a runtime choice (`run --mode ...`), and the
//! metadata extractor is its own subcommand so the downstream date processor
//! can shell out to it per URL.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for the crawl pipeline.
///
/// # Examples
///
/// ```sh
/// # Run the whole pipeline: scope parse, then both crawlers
/// crawl_pipeline run
///
/// # Re-run just the domain crawl against an existing domain.csv
/// crawl_pipeline run --mode domain-only
///
/// # Print the metadata report for one URL
/// crawl_pipeline extract https://example.com/story
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file overriding the default paths
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the crawl pipeline
    Run {
        /// Which stages to run
        #[arg(long, value_enum, default_value = "full")]
        mode: PipelineMode,
    },
    /// Fetch one URL and print its metadata/readability report
    Extract {
        /// The URL to fetch
        url: String,
    },
}

/// Stage selection for a pipeline run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// Scope parse, then the Twitter and domain crawls in parallel
    Full,
    /// Only the Twitter crawl, against the existing twitter.csv
    TwitterOnly,
    /// Only the domain crawl, against the existing domain.csv
    DomainOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults_to_the_full_pipeline() {
        let cli = Cli::parse_from(["crawl_pipeline", "run"]);
        match cli.command {
            Command::Run { mode } => assert_eq!(mode, PipelineMode::Full),
            _ => panic!("expected the run subcommand"),
        }
    }

    #[test]
    fn mode_flag_selects_a_single_branch() {
        let cli = Cli::parse_from(["crawl_pipeline", "run", "--mode", "domain-only"]);
        match cli.command {
            Command::Run { mode } => assert_eq!(mode, PipelineMode::DomainOnly),
            _ => panic!("expected the run subcommand"),
        }
    }

    #[test]
    fn extract_takes_a_positional_url() {
        let cli = Cli::parse_from(["crawl_pipeline", "extract", "https://example.com/story"]);
        match cli.command {
            Command::Extract { url } => assert_eq!(url, "https://example.com/story"),
            _ => panic!("expected the extract subcommand"),
        }
    }

    #[test]
    fn config_flag_is_accepted_before_the_subcommand() {
        let cli = Cli::parse_from(["crawl_pipeline", "-c", "./pipeline.yaml", "run"]);
        assert_eq!(cli.config.as_deref(), Some("./pipeline.yaml"));
    }
}
