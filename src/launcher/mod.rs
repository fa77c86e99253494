// ABOUTME: Orchestration of configured sessions against a live tmux server
// Converges the session/window/pane tree by issuing ordered tmux commands

pub mod error;
pub mod generate;
pub mod start;
pub mod stop;

pub use error::LaunchError;

use crate::shell::{Executor, ShellCommand};
use crate::tmux::TmuxClient;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Binary used when no explicit tmux path is configured.
pub const DEFAULT_TMUX_BIN: &str = "tmux";

/// Invocation-wide behaviour switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Do not attach to or switch to the session after starting it.
    pub detach: bool,
    /// Create windows inside the caller's current tmux session.
    pub inside: bool,
    /// Path to the tmux binary.
    pub tmux_path: Option<String>,
}

/// Starts and stops configured sessions through a [`TmuxClient`].
#[derive(Debug)]
pub struct Launcher<E> {
    tmux: TmuxClient<E>,
    options: Options,
    in_session: bool,
}

impl<E: Executor> Launcher<E> {
    /// Launcher for the current process; inside tmux when `$TMUX` is set.
    pub fn new(options: Options, executor: E) -> Self {
        let bin = options
            .tmux_path
            .clone()
            .unwrap_or_else(|| DEFAULT_TMUX_BIN.to_string());
        let in_session = std::env::var_os("TMUX").is_some();
        Self::with_client(TmuxClient::new(bin, executor), options, in_session)
    }

    pub fn with_client(tmux: TmuxClient<E>, options: Options, in_session: bool) -> Self {
        Self {
            tmux,
            options,
            in_session,
        }
    }

    pub fn tmux(&self) -> &TmuxClient<E> {
        &self.tmux
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether the process runs inside a tmux client.
    pub fn in_session(&self) -> bool {
        self.in_session
    }

    /// Switch the current client to `session`, or attach when outside tmux.
    pub fn switch_or_attach(&self, session: &str) -> Result<(), LaunchError> {
        if self.in_session {
            self.tmux.switch_client(session)?;
        } else {
            self.tmux.attach(session)?;
        }
        Ok(())
    }

    /// Run shell hooks one by one in `dir`, stopping at the first failure.
    fn run_hooks(&self, commands: &[String], dir: &Path) -> Result<(), LaunchError> {
        for command in commands {
            debug!(hook = %command, dir = %dir.display(), "running hook");
            self.tmux
                .executor()
                .execute(&ShellCommand::sh(command, dir))?;
        }
        Ok(())
    }

    fn set_env(&self, session: &str, env: &BTreeMap<String, String>) -> Result<(), LaunchError> {
        for (key, value) in env {
            self.tmux.set_env(session, key, value)?;
        }
        Ok(())
    }
}

fn current_dir() -> Result<PathBuf, LaunchError> {
    std::env::current_dir().map_err(LaunchError::CurrentDir)
}
