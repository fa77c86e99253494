// ABOUTME: Error types for external process execution
// Every failure carries the literal command line that was attempted

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("cannot run {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command {command:?} failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl ShellError {
    /// The command line that failed.
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }
}
