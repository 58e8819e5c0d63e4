//! Domain CSV reading.
//!
//! The scope parser leaves behind a flat `domain.csv` whose header row names
//! the columns and whose `Source` column carries the URLs the domain crawler
//! should visit. This module reads that file into ordered [`DomainRecord`]s
//! and folds them into the crawler's argument list.
//!
//! Reading is a single pass: the file is streamed row by row and materialized
//! once the stream ends. A malformed row aborts the read with a parse error;
//! the caller decides how far that failure reaches (the domain stage fails,
//! its sibling Twitter stage does not).

use crate::error::PipelineError;
use crate::models::DomainRecord;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Flag token that precedes the URL list in the domain crawler's argv.
const LINK_LIST_FLAG: &str = "-l";

/// Read the domain CSV into ordered records.
///
/// The first row is treated as the header; every subsequent row becomes one
/// [`DomainRecord`] keyed by the header names, in file order.
///
/// # Errors
///
/// Fails with [`PipelineError::Csv`] on a missing file or a malformed row.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn read_domain_records(path: &Path) -> Result<Vec<DomainRecord>, PipelineError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let fields: HashMap<String, String> = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        records.push(DomainRecord::new(fields));
    }

    info!(count = records.len(), "Read domain records");
    debug!(?records, "Domain records");
    Ok(records)
}

/// Fold domain records into the crawler argument list.
///
/// Produces `["-l", <source1>, <source2>, ...]` preserving record order.
/// Records without a usable `Source` value are skipped with a warning rather
/// than failing the stage; every remaining source still gets crawled.
pub fn source_arguments(records: &[DomainRecord]) -> Vec<String> {
    let mut args = vec![LINK_LIST_FLAG.to_string()];
    for (index, record) in records.iter().enumerate() {
        match record.source() {
            Some(source) => args.push(source.to_string()),
            None => warn!(index, "Domain record has no Source column; skipping row"),
        }
    }
    args
}
