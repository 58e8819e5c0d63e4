//! Data models shared across the pipeline.
//!
//! This module defines the small, transient value types that flow between the
//! stages:
//! - [`DomainRecord`]: one row of the domain CSV, keyed by header name
//! - [`ProcessOutput`]: the uniform result of an external-process invocation
//! - [`StageReport`]: what a crawl branch reports back to the orchestrator
//!
//! All of these are constructed per invocation and discarded once folded into
//! an argument list, a log line, or a process exit status. No persistent state
//! is owned here.

use std::collections::HashMap;

/// One row parsed from the domain CSV.
///
/// The record holds every column of the row keyed by the header name. The
/// domain crawl stage only consumes the `Source` column (a URL string), but
/// the remaining columns are kept so operators can log and inspect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    fields: HashMap<String, String>,
}

impl DomainRecord {
    /// Build a record from `(column name, value)` pairs.
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// The `Source` column, if present and non-empty.
    pub fn source(&self) -> Option<&str> {
        self.fields
            .get("Source")
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Look up an arbitrary column by header name.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Number of columns in this row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the row has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The result of one external-process invocation.
///
/// The shape is identical for both invoker modes. In blocking mode `stdout`
/// and `stderr` carry the full captured streams (always present, possibly
/// empty). In streaming mode the streams were already forwarded line-by-line
/// to the log sink, so both strings are empty and only `code` is meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code of the child, or `None` if it was terminated by a signal.
    pub code: Option<i32>,
    /// Captured standard output (blocking mode only).
    pub stdout: String,
    /// Captured standard error (blocking mode only).
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the child exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Outcome of one crawl branch, reported after the branch has fully finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageReport {
    /// The branch's external process ran to completion with this exit code.
    Completed {
        /// Exit code, `None` when the child was killed by a signal.
        code: Option<i32>,
    },
    /// The branch never got its process off the ground.
    Failed {
        /// Why the branch failed, already logged by the branch itself.
        reason: String,
    },
}

impl StageReport {
    /// Whether the branch completed with exit code zero.
    pub fn success(&self) -> bool {
        matches!(self, StageReport::Completed { code: Some(0) })
    }
}
