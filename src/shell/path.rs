// ABOUTME: User path expansion shared by the config loader, resolver and gateway

use std::path::{Path, PathBuf};

/// Expand `~` and `~/...` to the home directory and make relative paths
/// absolute against the current directory. Absolute paths pass through.
///
/// Falls back to the input when the home or current directory is unknown.
pub fn expand_path(path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| candidate.to_path_buf());
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => candidate.to_path_buf(),
        };
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(candidate),
        Err(_) => candidate.to_path_buf(),
    }
}

/// Whether `path` names an absolute or home-relative location.
pub(crate) fn is_anchored(path: &str) -> bool {
    path == "~" || path.starts_with("~/") || Path::new(path).is_absolute()
}
