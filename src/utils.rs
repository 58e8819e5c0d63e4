//! Small helpers for logging and file-system checks.

use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Log whether an expected file exists.
///
/// Used both as a soft precondition before spawning a crawler (the stage runs
/// regardless) and as a post-run sanity signal for the artifacts the domain
/// crawler is expected to produce. The result is operator information only;
/// nothing branches on it outside of tests.
///
/// # Arguments
///
/// * `label` - Short name for the file in log output
/// * `path` - The file to check
///
/// # Returns
///
/// `true` if the file exists.
pub async fn note_file(label: &'static str, path: &Path) -> bool {
    match fs::try_exists(path).await {
        Ok(true) => {
            info!(file = label, path = %path.display(), "File exists");
            true
        }
        Ok(false) => {
            warn!(file = label, path = %path.display(), "File not found");
            false
        }
        Err(e) => {
            warn!(file = label, path = %path.display(), error = %e, "Could not check file");
            false
        }
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte count
/// indicator appended. Used when echoing captured scope-parser output into
/// the log.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn note_file_reports_presence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{}").unwrap();

        assert!(note_file("artifact", file.path()).await);
        assert!(!note_file("artifact", Path::new("./missing.json")).await);
    }

    #[test]
    fn truncate_for_log_passes_short_strings_through() {
        assert_eq!(truncate_for_log("short", 100), "short");
    }

    #[test]
    fn truncate_for_log_cuts_long_strings() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }
}
