// ABOUTME: Error types for starting and stopping configured sessions

use crate::shell::ShellError;
use crate::tmux::TmuxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("you must specify a session name")]
    NoSessionName,

    #[error("no windows found in session {0}")]
    NoWindowsFound(String),

    #[error("cannot create windows inside the current session outside of tmux")]
    NotInsideSession,

    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error(transparent)]
    Tmux(#[from] TmuxError),

    #[error(transparent)]
    Shell(#[from] ShellError),
}
