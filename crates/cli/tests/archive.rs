use archiver_core::config::ConflictPolicy;
use archiver_core::models::ScoredFile;
use cli::apply::{archive_files, ArchiveSummary};
use cli::fs_apply::{apply_move, dry_run_command, plan_move, resolve_conflict, MoveOutcome};
use cli::paths::is_contained;
use std::fs;
use std::path::Path;

fn scored(name: &str, recency: f64) -> ScoredFile {
    ScoredFile {
        filename: name.to_string(),
        recency,
    }
}

#[test]
fn containment_rejects_escaping_names() {
    assert!(is_contained("benchy.gcode"));
    assert!(is_contained("sub/dir/part.gcode"));
    assert!(is_contained("./part.gcode"));
    assert!(!is_contained("../outside.gcode"));
    assert!(!is_contained("sub/../../outside.gcode"));
    assert!(!is_contained("/etc/passwd"));
    assert!(!is_contained(""));
}

#[test]
fn dry_run_commands_reference_both_paths() {
    let plan = plan_move("a.gcode", Path::new("/g"), Path::new("/a")).unwrap();
    assert_eq!(
        dry_run_command(&plan, ConflictPolicy::Skip),
        r#"mv -n "/g/a.gcode" "/a/a.gcode""#
    );
    assert_eq!(
        dry_run_command(&plan, ConflictPolicy::Overwrite),
        r#"mv -f "/g/a.gcode" "/a/a.gcode""#
    );
}

#[test]
fn moves_file_and_creates_nested_destination() {
    let temp = tempfile::tempdir().unwrap();
    let src_dir = temp.path().join("gcode");
    let dst_dir = temp.path().join("gcode/archive");
    fs::create_dir_all(src_dir.join("parts")).unwrap();
    fs::write(src_dir.join("parts/bracket.gcode"), "G28").unwrap();

    let plan = plan_move("parts/bracket.gcode", &src_dir, &dst_dir).unwrap();
    let outcome = apply_move(&plan, ConflictPolicy::Skip);
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            archived_to: dst_dir.join("parts/bracket.gcode")
        }
    );
    assert!(!src_dir.join("parts/bracket.gcode").exists());
    assert_eq!(
        fs::read_to_string(dst_dir.join("parts/bracket.gcode")).unwrap(),
        "G28"
    );
}

#[test]
fn existing_archive_directory_is_fine() {
    let temp = tempfile::tempdir().unwrap();
    let dst_dir = temp.path().join("archive");
    fs::create_dir_all(&dst_dir).unwrap();
    fs::write(temp.path().join("a.gcode"), "a").unwrap();
    fs::write(temp.path().join("b.gcode"), "b").unwrap();

    let views = archive_files(
        &[scored("a.gcode", 1.0), scored("b.gcode", 0.5)],
        temp.path(),
        &dst_dir,
        false,
        ConflictPolicy::Skip,
    );
    let summary = ArchiveSummary::from_views(&views);
    assert_eq!(summary.moved, 2);
    assert!(dst_dir.join("a.gcode").exists());
    assert!(dst_dir.join("b.gcode").exists());
}

#[test]
fn missing_source_is_skipped() {
    let temp = tempfile::tempdir().unwrap();
    let plan = plan_move("ghost.gcode", temp.path(), &temp.path().join("archive")).unwrap();
    assert_eq!(apply_move(&plan, ConflictPolicy::Skip), MoveOutcome::SkippedMissing);
}

#[test]
fn conflict_policies() {
    let temp = tempfile::tempdir().unwrap();
    let src_dir = temp.path().join("src");
    let dst_dir = temp.path().join("dst");
    fs::create_dir_all(&src_dir).unwrap();
    fs::create_dir_all(&dst_dir).unwrap();
    fs::write(dst_dir.join("cube.gcode"), "old").unwrap();

    fs::write(src_dir.join("cube.gcode"), "new").unwrap();
    let plan = plan_move("cube.gcode", &src_dir, &dst_dir).unwrap();
    assert_eq!(apply_move(&plan, ConflictPolicy::Skip), MoveOutcome::SkippedExisting);
    assert!(src_dir.join("cube.gcode").exists());
    assert_eq!(fs::read_to_string(dst_dir.join("cube.gcode")).unwrap(), "old");

    assert_eq!(
        dry_run_command(&plan, ConflictPolicy::Rename),
        format!(
            "mv -n \"{}\" \"{}\"",
            src_dir.join("cube.gcode").display(),
            dst_dir.join("cube_1.gcode").display()
        )
    );
    assert_eq!(
        apply_move(&plan, ConflictPolicy::Rename),
        MoveOutcome::Moved {
            archived_to: dst_dir.join("cube_1.gcode")
        }
    );
    assert_eq!(fs::read_to_string(dst_dir.join("cube_1.gcode")).unwrap(), "new");

    fs::write(src_dir.join("cube.gcode"), "newest").unwrap();
    assert_eq!(
        apply_move(&plan, ConflictPolicy::Overwrite),
        MoveOutcome::Moved {
            archived_to: dst_dir.join("cube.gcode")
        }
    );
    assert_eq!(fs::read_to_string(dst_dir.join("cube.gcode")).unwrap(), "newest");
}

#[test]
fn resolve_conflict_skips_taken_names() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("x.gcode"), "").unwrap();
    fs::write(temp.path().join("x_1.gcode"), "").unwrap();
    assert_eq!(
        resolve_conflict(&temp.path().join("x.gcode")),
        temp.path().join("x_2.gcode")
    );
    assert_eq!(
        resolve_conflict(&temp.path().join("README")),
        temp.path().join("README_1")
    );
}

#[test]
fn one_bad_file_does_not_stop_the_batch() {
    let temp = tempfile::tempdir().unwrap();
    let src_dir = temp.path().join("src");
    let dst_dir = temp.path().join("dst");
    fs::create_dir_all(&src_dir).unwrap();
    fs::write(src_dir.join("first.gcode"), "1").unwrap();
    fs::write(src_dir.join("last.gcode"), "3").unwrap();
    // A directory where the archived file should go makes that move fail.
    fs::create_dir_all(dst_dir.join("blocked.gcode/inner")).unwrap();
    fs::write(src_dir.join("blocked.gcode"), "2").unwrap();

    let views = archive_files(
        &[
            scored("first.gcode", 3.0),
            scored("../escape.gcode", 2.5),
            scored("blocked.gcode", 2.0),
            scored("last.gcode", 1.0),
        ],
        &src_dir,
        &dst_dir,
        false,
        ConflictPolicy::Overwrite,
    );
    assert_eq!(views.len(), 4);
    assert!(matches!(views[0].outcome, MoveOutcome::Moved { .. }));
    assert!(views[1].outcome.is_failure());
    assert!(views[1].source.is_none());
    assert!(views[2].outcome.is_failure());
    assert!(matches!(views[3].outcome, MoveOutcome::Moved { .. }));
    assert!(dst_dir.join("last.gcode").exists());
    assert!(src_dir.join("blocked.gcode").exists());
}

#[test]
fn dry_run_touches_nothing() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("a.gcode"), "a").unwrap();
    let dst_dir = temp.path().join("archive");
    let views = archive_files(
        &[scored("a.gcode", 1.0)],
        temp.path(),
        &dst_dir,
        true,
        ConflictPolicy::Skip,
    );
    assert!(matches!(views[0].outcome, MoveOutcome::Planned { .. }));
    assert!(temp.path().join("a.gcode").exists());
    assert!(!dst_dir.exists());
}
