//! Error types for the pipeline.
//!
//! Every failure the orchestrator can act on is a [`PipelineError`] variant.
//! The split mirrors how failures propagate:
//!
//! - [`PipelineError::Spawn`]: an external program could not be started at
//!   all. Fatal: nothing downstream of the stage has valid input.
//! - [`PipelineError::StageFailed`]: a stage whose exit code gates the rest
//!   of the pipeline (the scope parser) terminated with a non-zero code.
//! - [`PipelineError::Io`] / [`PipelineError::Csv`]: file-level failures.
//!   These fail the stage that hit them but leave sibling stages running.
//!
//! Crawler exit codes are deliberately *not* errors: a crawler that ran and
//! exited non-zero is reported through its stage result and logged, while its
//! sibling branch continues.

use thiserror::Error;

/// Failures surfaced by the orchestrator and the process invoker.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An external program could not be started (bad path, permissions).
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A gating stage terminated with a non-zero exit code.
    #[error("{stage} stage exited with code {code}")]
    StageFailed {
        /// Human-readable stage name.
        stage: &'static str,
        /// The child's exit code, or -1 if it was killed by a signal.
        code: i32,
    },

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The domain CSV could not be parsed.
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_names_the_program() {
        let err = PipelineError::Spawn {
            program: "python3".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("python3"));
    }

    #[test]
    fn stage_failure_reports_the_code() {
        let err = PipelineError::StageFailed {
            stage: "scope-parse",
            code: 2,
        };
        assert_eq!(err.to_string(), "scope-parse stage exited with code 2");
    }
}
