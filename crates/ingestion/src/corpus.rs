//! Corpus loading
//!
//! Parses the JSON array of paper records into `Paper` values. Records that
//! cannot be read as a paper, or that have an empty id, are skipped with a
//! warning instead of failing the whole corpus.

use crate::errors::IngestionError;
use citegraph_common::Paper;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Result of reading a corpus
#[derive(Debug, Clone)]
pub struct CorpusReport {
    /// Papers in file order
    pub papers: Vec<Paper>,

    /// Records dropped because they were not valid paper objects or had no id
    pub skipped: usize,

    /// Records whose id already appeared earlier in the file
    pub duplicate_ids: usize,

    /// Sum of `referenced_works` lengths
    pub listed_references: usize,

    /// Sum of the source-reported `in_json_reference_count` values
    pub declared_references: u64,
}

/// Read and parse a corpus file
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn load_corpus(path: &Path) -> Result<CorpusReport, IngestionError> {
    let origin = path.display().to_string();

    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestionError::FileNotFound(origin.clone())
        } else {
            IngestionError::IoError(e)
        }
    })?;

    let report = parse_corpus(&content, &origin)?;

    info!(
        papers = report.papers.len(),
        skipped = report.skipped,
        duplicate_ids = report.duplicate_ids,
        "Corpus loaded"
    );

    Ok(report)
}

/// Parse corpus text. `origin` is only used in error messages.
pub fn parse_corpus(content: &str, origin: &str) -> Result<CorpusReport, IngestionError> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(content.trim()).map_err(|e| IngestionError::Malformed {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

    let mut papers = Vec::with_capacity(records.len());
    let mut seen = HashSet::with_capacity(records.len());
    let mut skipped = 0;
    let mut duplicate_ids = 0;

    for (index, record) in records.into_iter().enumerate() {
        let paper = match Paper::deserialize(record) {
            Ok(paper) => paper,
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable paper record");
                skipped += 1;
                continue;
            }
        };

        if paper.id.trim().is_empty() {
            warn!(index, "Skipping paper record without id");
            skipped += 1;
            continue;
        }

        if !seen.insert(paper.id.clone()) {
            debug!(index, id = %paper.id, "Duplicate paper id, later record wins");
            duplicate_ids += 1;
        }

        papers.push(paper);
    }

    if papers.is_empty() {
        return Err(IngestionError::EmptyCorpus(origin.to_string()));
    }

    let listed_references = papers.iter().map(|p| p.referenced_works.len()).sum();
    let declared_references = papers
        .iter()
        .map(|p| u64::from(p.in_json_reference_count))
        .sum();

    if declared_references != listed_references as u64 {
        debug!(
            listed_references,
            declared_references,
            "Reported reference counts differ from listed references"
        );
    }

    Ok(CorpusReport {
        papers,
        skipped,
        duplicate_ids,
        listed_references,
        declared_references,
    })
}
