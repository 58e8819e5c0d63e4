//! Pipeline configuration.
//!
//! Every external path the orchestrator touches lives in [`PipelineConfig`]:
//! interpreter binaries, crawler script paths, the CSV hand-off files the
//! scope parser produces, and the JSON artifacts the domain crawler is
//! expected to leave behind. Defaults match the conventional relative layout;
//! a YAML file passed with `--config` overrides any subset of fields.
//!
//! Keeping the paths in one injectable struct is what lets the tests run the
//! whole pipeline against fake executables and scratch directories.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// All external paths and interpreters used by the pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Interpreter used for the Python tools (scope parser, Twitter crawler).
    pub python_bin: String,
    /// Interpreter used for the domain crawler script.
    pub node_bin: String,
    /// Path to the scope parser script.
    pub scope_parser: PathBuf,
    /// Input CSV handed to the scope parser.
    pub scope_input: PathBuf,
    /// Path to the Twitter crawler script.
    pub twitter_crawler: PathBuf,
    /// Path to the domain crawler script.
    pub domain_crawler: PathBuf,
    /// CSV of domain records, produced by the scope parser.
    pub domain_csv: PathBuf,
    /// CSV of Twitter sources, produced by the scope parser.
    pub twitter_csv: PathBuf,
    /// Links the domain crawler failed to fetch (existence-checked only).
    pub failed_links: PathBuf,
    /// Link/title pairs the domain crawler resolved (existence-checked only).
    pub link_titles: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            python_bin: "python3".to_string(),
            node_bin: "node".to_string(),
            scope_parser: PathBuf::from("./scope_parser/main.py"),
            scope_input: PathBuf::from("./scope_parser/csv/input.csv"),
            twitter_crawler: PathBuf::from("./twitter_crawler.py"),
            domain_crawler: PathBuf::from("./newCrawler/crawl.js"),
            domain_csv: PathBuf::from("./domain.csv"),
            twitter_csv: PathBuf::from("./twitter.csv"),
            failed_links: PathBuf::from("./failed_links_list.json"),
            link_titles: PathBuf::from("./link_title_list.json"),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file, or fall back to the defaults.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional path to a YAML config file
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or does not parse as a
    /// (partial) [`PipelineConfig`].
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)?;
                let config: PipelineConfig = serde_yaml::from_str(&raw)?;
                info!(path = %p.display(), "Loaded pipeline configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
