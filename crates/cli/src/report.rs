//! Text and JSON rendering of a run.

use crate::apply::{ArchiveSummary, ArchiveView};
use crate::fs_apply::MoveOutcome;
use archiver_core::models::ScoredFile;
use archiver_core::selector::Selection;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use std::io::{self, Write};
use std::path::Path;

pub const RECENCY_METRIC: &str = "max(modified, print_start_time)";

pub fn write_selection(out: &mut dyn Write, selection: &Selection) -> io::Result<()> {
    writeln!(out, "Recency metric = {}", RECENCY_METRIC)?;
    writeln!(out, "Keeping {} files:", selection.keep.len())?;
    for f in &selection.keep {
        writeln!(out, "  KEEP   {:.3}  {}", f.recency, f.filename)?;
    }
    writeln!(out)?;
    writeln!(out, "Archiving {} files:", selection.archive.len())?;
    for f in &selection.archive {
        if f.is_unknown() {
            writeln!(out, "  ARCH   unknown   {}", f.filename)?;
        } else {
            writeln!(out, "  ARCH   {:.3}  {}", f.recency, f.filename)?;
        }
    }
    Ok(())
}

/// Per-file lines: commands and confirmations on `out`; move errors and
/// skipped name clashes on `err`.
pub fn write_archive(
    out: &mut dyn Write,
    err: &mut dyn Write,
    views: &[ArchiveView],
    dry_run: bool,
    verbose: bool,
    archive_dir: &Path,
) -> io::Result<()> {
    writeln!(out)?;
    if verbose {
        if dry_run {
            writeln!(out, "Dry run. The following commands would be executed:")?;
        } else {
            writeln!(out, "Executing moves to archive: {}", archive_dir.display())?;
        }
    }

    for v in views {
        let src = v.source.as_deref().unwrap_or(&v.filename);
        let dst = v.destination.as_deref().unwrap_or("");
        match &v.outcome {
            MoveOutcome::Planned { command } => writeln!(out, "{}", command)?,
            MoveOutcome::Moved { archived_to } => {
                writeln!(out, "moved: {} -> {}", src, archived_to.display())?
            }
            MoveOutcome::SkippedMissing => {
                if verbose {
                    writeln!(out, "skip (missing): {}", src)?;
                }
            }
            MoveOutcome::SkippedExisting => writeln!(err, "skip (exists): {}", dst)?,
            MoveOutcome::Failed { reason } => write_failure(err, v, reason)?,
        }
    }

    if verbose && !dry_run {
        let s = ArchiveSummary::from_views(views);
        writeln!(
            out,
            "archive summary: moved={}, skipped={}, failed={}",
            s.moved,
            s.skipped_missing + s.skipped_existing,
            s.failed
        )?;
    }
    Ok(())
}

/// Stderr notes for files that stayed in place: failures and skipped name clashes.
pub fn write_failures(err: &mut dyn Write, views: &[ArchiveView]) -> io::Result<()> {
    for v in views {
        match &v.outcome {
            MoveOutcome::Failed { reason } => write_failure(err, v, reason)?,
            MoveOutcome::SkippedExisting => writeln!(
                err,
                "skip (exists): {}",
                v.destination.as_deref().unwrap_or("")
            )?,
            _ => {}
        }
    }
    Ok(())
}

fn write_failure(err: &mut dyn Write, v: &ArchiveView, reason: &str) -> io::Result<()> {
    match (&v.source, &v.destination) {
        (Some(src), Some(dst)) => writeln!(err, "error moving {} -> {}: {}", src, dst, reason),
        _ => writeln!(err, "error moving {}: {}", v.filename, reason),
    }
}

/// RFC 3339 rendering of a recency, `None` for the unknown sentinel.
pub fn recency_utc(recency: f64) -> Option<String> {
    if recency < 0.0 || !recency.is_finite() {
        return None;
    }
    let secs = recency.trunc() as i64;
    let nanos = ((recency.fract() * 1e9).round() as u32).min(999_999_999);
    DateTime::<Utc>::from_timestamp(secs, nanos)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn scored_json(f: &ScoredFile) -> serde_json::Value {
    json!({
        "filename": f.filename,
        "recency": f.recency,
        "recency_utc": recency_utc(f.recency),
    })
}

pub fn json_report(selection: &Selection, views: &[ArchiveView], dry_run: bool) -> serde_json::Value {
    let archive: Vec<serde_json::Value> = views
        .iter()
        .map(|v| {
            let mut entry = serde_json::to_value(v).unwrap_or(serde_json::Value::Null);
            if let Some(obj) = entry.as_object_mut() {
                obj.insert("recency_utc".into(), json!(recency_utc(v.recency)));
            }
            entry
        })
        .collect();
    json!({
        "status": "ok",
        "dry_run": dry_run,
        "recency_metric": RECENCY_METRIC,
        "keep": selection.keep.iter().map(scored_json).collect::<Vec<_>>(),
        "archive": archive,
        "summary": {
            "kept": selection.keep.len(),
            "archived": selection.archive.len(),
            "moves": ArchiveSummary::from_views(views),
        },
    })
}
