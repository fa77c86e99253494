// ABOUTME: Stop pass: kill requested windows, or run after-hooks and kill whole sessions
// Nested sessions are stopped before their parent; the first failure aborts the pass

use super::{current_dir, LaunchError, Launcher};
use crate::config::Config;
use crate::shell::Executor;
use crate::tmux::Target;
use std::path::Path;
use tracing::info;

impl<E: Executor> Launcher<E> {
    /// Stop `config` and its nested sessions.
    ///
    /// With `windows` given only those windows are killed and every session
    /// keeps running; no `after` hooks run.
    pub fn stop(&self, config: &Config, windows: &[String]) -> Result<(), LaunchError> {
        let cwd = current_dir()?;
        self.stop_tree(config, windows, &cwd)
    }

    fn stop_tree(
        &self,
        config: &Config,
        windows: &[String],
        cwd: &Path,
    ) -> Result<(), LaunchError> {
        for nested in &config.sessions {
            self.stop_tree(nested, windows, cwd)?;
        }
        self.stop_session(config, windows, cwd)
    }

    fn stop_session(
        &self,
        session: &Config,
        windows: &[String],
        cwd: &Path,
    ) -> Result<(), LaunchError> {
        if session.session.is_empty() {
            return Err(LaunchError::NoSessionName);
        }
        let target = Target::session(&session.session);

        if !windows.is_empty() {
            for window in windows {
                self.tmux.kill_window(&target.clone().with_window(window))?;
            }
            info!(session = %session.session, ?windows, "killed windows");
            return Ok(());
        }

        if !session.after.is_empty() {
            self.run_hooks(&session.after, &session.session_dir(cwd))?;
        }
        self.tmux.kill_session(&target)?;
        info!(session = %session.session, "killed session");
        Ok(())
    }
}
