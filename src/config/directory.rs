// ABOUTME: Working-directory precedence shared by sessions, windows and panes

use crate::shell::expand_path;
use crate::shell::path::is_anchored;
use std::path::{Path, PathBuf};

/// Resolve a declared directory against its parent's resolved directory.
///
/// - `""` inherits `parent`
/// - `.` or `./` is the invoking process's current directory
/// - absolute and `~/` paths are expanded verbatim
/// - anything else is joined under `parent`
pub fn resolve_dir(requested: &str, parent: &Path, cwd: &Path) -> PathBuf {
    match requested {
        "" => parent.to_path_buf(),
        "." | "./" => cwd.to_path_buf(),
        anchored if is_anchored(anchored) => expand_path(anchored),
        relative => parent.join(relative),
    }
}
