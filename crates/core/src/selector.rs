use crate::models::{FileRecord, ScoredFile};
use crate::recency::compute_recency;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub keep: Vec<ScoredFile>,
    pub archive: Vec<ScoredFile>,
}

impl Selection {
    pub fn total(&self) -> usize {
        self.keep.len() + self.archive.len()
    }
}

pub fn score_all(records: &[FileRecord]) -> Vec<ScoredFile> {
    records
        .iter()
        .map(|r| ScoredFile {
            filename: r.filename.clone(),
            recency: compute_recency(r),
        })
        .collect()
}

/// Splits records into the `keep_count` most recent files and the rest, newest first.
///
/// Equal recencies keep their input order.
pub fn select_keep_and_archive(records: &[FileRecord], keep_count: usize) -> Selection {
    let mut scored = score_all(records);
    // Vec::sort_by is stable.
    scored.sort_by(|a, b| b.recency.total_cmp(&a.recency));

    let split = keep_count.min(scored.len());
    let archive = scored.split_off(split);
    debug!(
        keep = scored.len(),
        archive = archive.len(),
        "partitioned files by recency"
    );
    Selection {
        keep: scored,
        archive,
    }
}
