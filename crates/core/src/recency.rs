use crate::models::FileRecord;

/// Sort key for files without any usable timestamp; sorts after every real time.
pub const UNKNOWN_RECENCY: f64 = -1.0;

/// Recency metric: `max(modified, print_start_time)` over the fields that are present.
pub fn compute_recency(record: &FileRecord) -> f64 {
    [record.modified, record.print_start_time]
        .into_iter()
        .flatten()
        .reduce(f64::max)
        .unwrap_or(UNKNOWN_RECENCY)
}
