// ABOUTME: Error types for loading and composing configuration documents

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config not found at {path:?}: {source}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config not found for project {project} in {dir:?}")]
    ProjectNotFound { project: String, dir: PathBuf },

    #[error("!include must be applied to a scalar file path")]
    InvalidIncludeTarget,

    #[error("include cycle detected at {path:?}")]
    IncludeCycle { path: PathBuf },

    #[error("invalid YAML in included file {path:?}: {source}")]
    InvalidInclude {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot locate home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
