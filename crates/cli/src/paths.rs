use std::path::{Component, Path, PathBuf};

/// Returns true if `relative` stays inside whatever directory it is joined onto.
/// Absolute paths and `..` components are rejected; `.` is harmless.
pub fn is_contained(relative: &str) -> bool {
    if relative.is_empty() {
        return false;
    }
    Path::new(relative)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Joins a server-reported filename onto `root`, or `None` if it would escape.
pub fn join_contained(root: &Path, relative: &str) -> Option<PathBuf> {
    is_contained(relative).then(|| root.join(relative))
}
