// ABOUTME: Locates project files from CLI arguments
// A named project lives in the config directory; otherwise .loom.yml in the cwd

use loom::config::{config_dir, find_config, ConfigError, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Resolve the config file for an invocation. An explicit `--file` wins,
/// then a named project, then `.loom.yml` in `cwd`.
pub fn find_project_file(
    project: Option<&str>,
    file: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf, ConfigError> {
    if let Some(file) = file {
        return Ok(file.to_path_buf());
    }
    match project {
        Some(name) if !name.is_empty() => find_config(&config_dir()?, name),
        _ => {
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                Ok(candidate)
            } else {
                Err(ConfigError::ProjectNotFound {
                    project: DEFAULT_CONFIG_FILE.to_string(),
                    dir: cwd.to_path_buf(),
                })
            }
        }
    }
}

/// Path a new or edited project should be written to, whether or not it exists yet.
pub fn project_file_for_edit(
    project: Option<&str>,
    file: Option<&Path>,
    cwd: &Path,
) -> Result<PathBuf, ConfigError> {
    match find_project_file(project, file, cwd) {
        Ok(path) => Ok(path),
        Err(ConfigError::ProjectNotFound { .. }) => match project {
            Some(name) if !name.is_empty() => Ok(config_dir()?.join(format!("{name}.yml"))),
            _ => Ok(cwd.join(DEFAULT_CONFIG_FILE)),
        },
        Err(err) => Err(err),
    }
}

/// Replace a leading home directory with `~` for display.
pub fn shorten_path(path: &Path) -> String {
    shorten_path_with_home(path, dirs::home_dir().as_deref())
}

fn shorten_path_with_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(rest) = home.and_then(|home| path.strip_prefix(home).ok()) {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}
