//! The crawl pipeline orchestrator.
//!
//! Sequences three stages over external tools:
//!
//! 1. **Scope parse** (blocking): feed the input CSV to the scope parser,
//!    which splits it into `domain.csv` and `twitter.csv`. A non-zero exit or
//!    a spawn failure halts the pipeline here, since nothing downstream has valid
//!    input without the parser's output files.
//! 2. **Crawling** (concurrent): the Twitter crawler and the domain crawler
//!    run as two independent branches with no mutual ordering. Each branch
//!    logs its own outcome; a failure in one never cancels the other.
//! 3. **Done**: reached once both branches have completed. Crawler exit codes
//!    and missing artifacts are operator signals, not failures.
//!
//! File-existence checks before and after the crawls are soft: they warn,
//! they never gate.

use crate::cli::PipelineMode;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::invoker::{invoke, ExternalCommand, InvokeMode};
use crate::models::StageReport;
use crate::records::{read_domain_records, source_arguments};
use crate::utils::{note_file, truncate_for_log};
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// The three stages of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Split the scope input into per-crawler CSVs.
    ScopeParse,
    /// Crawl the Twitter sources listed in `twitter.csv`.
    TwitterCrawl,
    /// Crawl the domain sources listed in `domain.csv`.
    DomainCrawl,
}

impl Stage {
    /// Stage name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Stage::ScopeParse => "scope-parse",
            Stage::TwitterCrawl => "twitter-crawl",
            Stage::DomainCrawl => "domain-crawl",
        }
    }

    /// Input files this stage expects to find on disk.
    ///
    /// Absence is tolerated: the files are checked and warned about before
    /// the stage's process is spawned, but the spawn happens regardless. The
    /// Twitter stage also looks at `domain.csv` purely so the operator sees
    /// both halves of the scope parser's output in one place.
    pub fn expected_inputs(self, config: &PipelineConfig) -> Vec<PathBuf> {
        match self {
            Stage::ScopeParse => vec![config.scope_input.clone()],
            Stage::TwitterCrawl => vec![config.domain_csv.clone(), config.twitter_csv.clone()],
            Stage::DomainCrawl => vec![config.domain_csv.clone()],
        }
    }
}

/// Run the pipeline in the given mode.
///
/// `Full` runs the scope parse and then both crawl branches; `TwitterOnly`
/// and `DomainOnly` skip the scope parse and run a single branch against
/// whatever CSVs are already on disk.
///
/// # Errors
///
/// Only the scope stage is fatal: [`PipelineError::Spawn`] when the parser
/// cannot be started, [`PipelineError::StageFailed`] when it exits non-zero.
/// Crawl-branch failures are logged and folded into the completion summary.
#[instrument(level = "info", skip_all, fields(mode = ?mode))]
pub async fn run(config: &PipelineConfig, mode: PipelineMode) -> Result<(), PipelineError> {
    match mode {
        PipelineMode::Full => {
            run_scope_parse(config).await?;
            let (twitter, domain) =
                futures::join!(run_twitter_crawl(config), run_domain_crawl(config));
            summarize(Stage::TwitterCrawl, &twitter);
            summarize(Stage::DomainCrawl, &domain);
        }
        PipelineMode::TwitterOnly => {
            let report = run_twitter_crawl(config).await;
            summarize(Stage::TwitterCrawl, &report);
        }
        PipelineMode::DomainOnly => {
            let report = run_domain_crawl(config).await;
            summarize(Stage::DomainCrawl, &report);
        }
    }
    info!("Pipeline finished");
    Ok(())
}

/// Stage 1: run the scope parser to completion and gate on its exit code.
#[instrument(level = "info", skip_all)]
async fn run_scope_parse(config: &PipelineConfig) -> Result<(), PipelineError> {
    for input in Stage::ScopeParse.expected_inputs(config) {
        note_file("scope input", &input).await;
    }

    let command = ExternalCommand::new(
        &config.python_bin,
        [
            config.scope_parser.display().to_string(),
            config.scope_input.display().to_string(),
        ],
    );
    let output = invoke(&command, InvokeMode::Blocking).await?;

    if !output.stdout.is_empty() {
        info!(stdout = %truncate_for_log(&output.stdout, 2000), "Scope parser stdout");
    }
    if !output.stderr.is_empty() {
        warn!(stderr = %truncate_for_log(&output.stderr, 2000), "Scope parser stderr");
    }

    if !output.success() {
        return Err(PipelineError::StageFailed {
            stage: Stage::ScopeParse.name(),
            code: output.code.unwrap_or(-1),
        });
    }
    info!("Scope parsing finished; crawler CSVs should be ready");
    Ok(())
}

/// Twitter branch: stream the Twitter crawler over `twitter.csv`.
#[instrument(level = "info", skip_all)]
async fn run_twitter_crawl(config: &PipelineConfig) -> StageReport {
    for input in Stage::TwitterCrawl.expected_inputs(config) {
        note_file("crawler input", &input).await;
    }

    let command = ExternalCommand::new(
        &config.python_bin,
        [
            config.twitter_crawler.display().to_string(),
            config.twitter_csv.display().to_string(),
        ],
    );
    match invoke(&command, InvokeMode::Streaming { stream: "twitter-crawl" }).await {
        Ok(output) => {
            if !output.success() {
                warn!(code = ?output.code, "Twitter crawler exited non-zero");
            }
            info!("Finished crawling Twitter; per-handle CSVs should be ready");
            StageReport::Completed { code: output.code }
        }
        Err(e) => {
            error!(error = %e, "Twitter crawler could not be started");
            StageReport::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Domain branch: read `domain.csv`, hand every `Source` URL to the crawler.
#[instrument(level = "info", skip_all)]
async fn run_domain_crawl(config: &PipelineConfig) -> StageReport {
    let records = match read_domain_records(&config.domain_csv) {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, path = %config.domain_csv.display(), "Could not read domain records");
            return StageReport::Failed {
                reason: e.to_string(),
            };
        }
    };

    let mut args = vec![config.domain_crawler.display().to_string()];
    args.extend(source_arguments(&records));
    info!(?args, "Invoking domain crawler");

    let command = ExternalCommand::new(&config.node_bin, args);
    match invoke(&command, InvokeMode::Streaming { stream: "domain-crawl" }).await {
        Ok(output) => {
            if !output.success() {
                warn!(code = ?output.code, "Domain crawler exited non-zero");
            }
            info!("Finished crawling domains; result JSONs should be ready");
            // Post-run sanity signal only; nothing branches on these.
            note_file("failed links list", &config.failed_links).await;
            note_file("link title list", &config.link_titles).await;
            StageReport::Completed { code: output.code }
        }
        Err(e) => {
            error!(error = %e, "Domain crawler could not be started");
            StageReport::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Log a branch's final outcome.
fn summarize(stage: Stage, report: &StageReport) {
    if report.success() {
        info!(stage = stage.name(), "Branch completed");
        return;
    }
    match report {
        StageReport::Completed { code } => {
            warn!(stage = stage.name(), code = ?code, "Branch completed with a non-zero exit");
        }
        StageReport::Failed { reason } => {
            warn!(stage = stage.name(), %reason, "Branch failed");
        }
    }
}
