use crate::fs_apply::{self, MoveOutcome};
use archiver_core::config::ConflictPolicy;
use archiver_core::models::ScoredFile;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct ArchiveView {
    pub filename: String,
    pub recency: f64,
    pub source: Option<String>,
    pub destination: Option<String>,
    #[serde(flatten)]
    pub outcome: MoveOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    pub planned: usize,
    pub moved: usize,
    pub skipped_missing: usize,
    pub skipped_existing: usize,
    pub failed: usize,
}

impl ArchiveSummary {
    pub fn from_views(views: &[ArchiveView]) -> Self {
        let mut summary = ArchiveSummary::default();
        for v in views {
            match v.outcome {
                MoveOutcome::Planned { .. } => summary.planned += 1,
                MoveOutcome::Moved { .. } => summary.moved += 1,
                MoveOutcome::SkippedMissing => summary.skipped_missing += 1,
                MoveOutcome::SkippedExisting => summary.skipped_existing += 1,
                MoveOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Moves (or, in a dry run, describes moving) every archived file from
/// `gcode_dir` into `archive_dir`, one at a time and in list order.
///
/// A failing file is recorded and the batch carries on; files already moved
/// stay moved.
pub fn archive_files(
    archive: &[ScoredFile],
    gcode_dir: &Path,
    archive_dir: &Path,
    dry_run: bool,
    conflict: ConflictPolicy,
) -> Vec<ArchiveView> {
    let mut views = Vec::with_capacity(archive.len());

    for file in archive {
        let plan = match fs_apply::plan_move(&file.filename, gcode_dir, archive_dir) {
            Ok(plan) => plan,
            Err(reason) => {
                debug!(file = %file.filename, "{}", reason);
                views.push(ArchiveView {
                    filename: file.filename.clone(),
                    recency: file.recency,
                    source: None,
                    destination: None,
                    outcome: MoveOutcome::Failed { reason },
                });
                continue;
            }
        };

        let outcome = if dry_run {
            MoveOutcome::Planned {
                command: fs_apply::dry_run_command(&plan, conflict),
            }
        } else {
            let outcome = fs_apply::apply_move(&plan, conflict);
            match &outcome {
                MoveOutcome::Moved { archived_to } => {
                    info!(from = %plan.source.display(), to = %archived_to.display(), "archived")
                }
                MoveOutcome::Failed { reason } => {
                    debug!(from = %plan.source.display(), "move failed: {}", reason)
                }
                _ => {}
            }
            outcome
        };

        views.push(ArchiveView {
            filename: file.filename.clone(),
            recency: file.recency,
            source: Some(plan.source.to_string_lossy().into_owned()),
            destination: Some(plan.destination.to_string_lossy().into_owned()),
            outcome,
        });
    }

    views
}
