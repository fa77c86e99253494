// ABOUTME: Config file discovery and loading
// Reads a project file, interpolates variables, expands includes and fills session defaults

use super::{interpolate, Config, ConfigError, IncludeResolver};
use serde_yaml::Value;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Delay before each typed command, in milliseconds.
pub const DEFAULT_COMMAND_DELAY_MS: u64 = 500;

/// Session name exported into the root session's environment.
pub const ENV_SESSION: &str = "LOOM_SESSION";

/// Absolute config path exported into the root session's environment. When
/// the caller sets it to a directory it also overrides the project directory.
pub const ENV_CONFIG_PATH: &str = "LOOM_SESSION_CONFIG_PATH";

/// Project file looked up in the current directory when no project is named.
pub const DEFAULT_CONFIG_FILE: &str = ".loom.yml";

const CONFIG_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// Directory holding named project files.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    config_dir_from(std::env::var_os(ENV_CONFIG_PATH), dirs::home_dir())
}

/// `$LOOM_SESSION_CONFIG_PATH` names a directory when set by the user and a
/// file inside sessions loom started; only the directory form overrides.
fn config_dir_from(
    override_path: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(value) = override_path.filter(|value| !value.is_empty()) {
        let path = PathBuf::from(value);
        if !path.is_file() {
            return Ok(path);
        }
        debug!(path = %path.display(), "ignoring config path that names a file");
    }
    let home = home.ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("loom"))
}

/// Find `<project>.yml` or `<project>.yaml` inside `dir`.
pub fn find_config(dir: &Path, project: &str) -> Result<PathBuf, ConfigError> {
    for ext in CONFIG_EXTENSIONS {
        let candidate = dir.join(format!("{project}.{ext}"));
        match fs::metadata(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Err(ConfigError::ProjectNotFound {
        project: project.to_string(),
        dir: dir.to_path_buf(),
    })
}

/// File names of every project config in `dir`, sorted.
pub fn list_configs(dir: &Path) -> Result<Vec<String>, ConfigError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_config = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext));
        if !is_config {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Build a config from raw text: interpolate `vars`, expand includes, decode.
pub fn render_config(data: &str, vars: &HashMap<String, String>) -> Result<Config, ConfigError> {
    render_with(data, vars, IncludeResolver::new())
}

fn render_with(
    data: &str,
    vars: &HashMap<String, String>,
    mut resolver: IncludeResolver,
) -> Result<Config, ConfigError> {
    let data = interpolate(data, vars);
    let document: Value = serde_yaml::from_str(&data)?;
    let document = resolver.resolve(document)?;
    if document.is_null() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_value(document)?)
}

/// Load the project file at `path` and export the session name and config
/// path into the root session's environment.
pub fn load_config(path: &Path, vars: &HashMap<String, String>) -> Result<Config, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::ConfigNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let path = absolute_config_path(path)?;
    debug!(path = %path.display(), "loading config");

    let mut config = render_with(&data, vars, IncludeResolver::for_root(&path))?;

    let recorded = path.display().to_string();
    config.config_path.clone_from(&recorded);
    inherit_config_path(&mut config.sessions, &recorded);
    config
        .env
        .insert(ENV_SESSION.to_string(), config.session.clone());
    config.env.insert(ENV_CONFIG_PATH.to_string(), recorded);
    Ok(config)
}

/// Absolute path of the config file with a symlinked file resolved to its target.
fn absolute_config_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if fs::symlink_metadata(&absolute)?.file_type().is_symlink() {
        return Ok(fs::canonicalize(&absolute)?);
    }
    Ok(absolute)
}

/// Inline nested sessions live in their parent's file.
fn inherit_config_path(sessions: &mut [Config], parent: &str) {
    for session in sessions {
        if session.config_path.is_empty() {
            session.config_path = parent.to_string();
        }
        let own = session.config_path.clone();
        inherit_config_path(&mut session.sessions, &own);
    }
}
