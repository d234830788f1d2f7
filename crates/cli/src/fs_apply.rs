use crate::paths;
use archiver_core::config::ConflictPolicy;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedMove {
    pub filename: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Dry run: the command that would have been executed.
    Planned { command: String },
    Moved { archived_to: PathBuf },
    SkippedMissing,
    SkippedExisting,
    Failed { reason: String },
}

impl MoveOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, MoveOutcome::Failed { .. })
    }
}

/// Resolves source and destination for one archived filename.
pub fn plan_move(filename: &str, gcode_dir: &Path, archive_dir: &Path) -> Result<PlannedMove, String> {
    match (
        paths::join_contained(gcode_dir, filename),
        paths::join_contained(archive_dir, filename),
    ) {
        (Some(source), Some(destination)) => Ok(PlannedMove {
            filename: filename.to_string(),
            source,
            destination,
        }),
        _ => Err(format!(
            "refusing to move '{}': path escapes the gcode or archive directory",
            filename
        )),
    }
}

/// Shell equivalent of a planned move. Reads the filesystem only to pick a
/// renamed target under [`ConflictPolicy::Rename`].
pub fn dry_run_command(plan: &PlannedMove, conflict: ConflictPolicy) -> String {
    match conflict {
        ConflictPolicy::Skip => format!(
            "mv -n \"{}\" \"{}\"",
            plan.source.display(),
            plan.destination.display()
        ),
        ConflictPolicy::Overwrite => format!(
            "mv -f \"{}\" \"{}\"",
            plan.source.display(),
            plan.destination.display()
        ),
        ConflictPolicy::Rename => {
            let target = if plan.destination.exists() {
                resolve_conflict(&plan.destination)
            } else {
                plan.destination.clone()
            };
            format!(
                "mv -n \"{}\" \"{}\"",
                plan.source.display(),
                target.display()
            )
        }
    }
}

/// Executes one planned move. Never panics and never returns early with an
/// error: every problem becomes a [`MoveOutcome`].
pub fn apply_move(plan: &PlannedMove, conflict: ConflictPolicy) -> MoveOutcome {
    if let Some(parent) = plan.destination.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            return MoveOutcome::Failed {
                reason: format!("cannot create {}: {}", parent.display(), e),
            };
        }
    }

    match fs::symlink_metadata(&plan.source) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => return MoveOutcome::SkippedMissing,
        _ => {}
    }

    let target = if plan.destination.exists() {
        match conflict {
            ConflictPolicy::Skip => return MoveOutcome::SkippedExisting,
            ConflictPolicy::Overwrite => plan.destination.clone(),
            ConflictPolicy::Rename => resolve_conflict(&plan.destination),
        }
    } else {
        plan.destination.clone()
    };

    match move_file(&plan.source, &target) {
        Ok(()) => MoveOutcome::Moved {
            archived_to: target,
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => MoveOutcome::SkippedMissing,
        Err(e) => MoveOutcome::Failed {
            reason: e.to_string(),
        },
    }
}

/// `name.ext` -> first free `name_N.ext` next to it.
pub fn resolve_conflict(dest: &Path) -> PathBuf {
    let stem = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file")
        .to_string();
    let ext = dest
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut counter = 1;
    loop {
        let name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };
        let candidate = parent.join(name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Rename, falling back to copy-then-delete only when the archive lives on
/// another filesystem. Any other rename error is returned untouched.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if needs_copy_fallback(&e) && from.is_file() => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

fn needs_copy_fallback(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}
