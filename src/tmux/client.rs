// ABOUTME: TmuxClient translating logical session/window/pane operations into tmux invocations
// Every call is a blocking process run through the configured Executor

use super::format::{parse_output, PaneInfo, SessionInfo, TmuxRecord, WindowInfo};
use super::{SplitType, Target, TmuxError};
use crate::shell::{Executor, ShellCommand};
use std::path::Path;

/// Command gateway to a tmux binary.
#[derive(Debug, Clone)]
pub struct TmuxClient<E> {
    bin: String,
    executor: E,
}

impl<E: Executor> TmuxClient<E> {
    pub fn new(bin: impl Into<String>, executor: E) -> Self {
        Self {
            bin: bin.into(),
            executor,
        }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn command(&self) -> ShellCommand {
        ShellCommand::new(&self.bin)
    }

    fn with_dir(cmd: ShellCommand, dir: &Path) -> ShellCommand {
        if dir.as_os_str().is_empty() {
            cmd
        } else {
            cmd.args(["-c".to_string(), dir.display().to_string()])
        }
    }

    /// Whether the tmux binary can be run at all.
    pub fn check_installed(&self) -> bool {
        self.executor.execute(&self.command().arg("-V")).is_ok()
    }

    /// Create a detached session and return its id.
    ///
    /// Naming the first window disables tmux's automatic-rename for it.
    pub fn new_session(
        &self,
        name: &str,
        dir: &Path,
        window_name: &str,
    ) -> Result<String, TmuxError> {
        let mut cmd = self
            .command()
            .args(["new-session", "-Pd", "-F", "#{session_id}"]);
        if !name.is_empty() {
            cmd = cmd.args(["-s", name]);
        }
        if !window_name.is_empty() {
            cmd = cmd.args(["-n", window_name]);
        }
        cmd = Self::with_dir(cmd, dir);
        Ok(self.executor.execute(&cmd)?)
    }

    /// Create a detached window and return its id.
    pub fn new_window(&self, target: &Target, name: &str, dir: &Path) -> Result<String, TmuxError> {
        let mut cmd = self
            .command()
            .args(["new-window", "-Pd", "-t"])
            .arg(target.to_string());
        if !name.is_empty() {
            cmd = cmd.args(["-n", name]);
        }
        cmd = cmd.args(["-F", "#{window_id}"]);
        cmd = Self::with_dir(cmd, dir);
        Ok(self.executor.execute(&cmd)?)
    }

    /// Split the targeted window and return the new pane's id.
    ///
    /// Without an orientation tmux falls back to its own default split.
    pub fn new_pane(
        &self,
        target: &Target,
        dir: &Path,
        split: Option<SplitType>,
    ) -> Result<String, TmuxError> {
        let mut cmd = self
            .command()
            .args(["split-window", "-Pd", "-t"])
            .arg(target.to_string());
        if let Some(split) = split {
            cmd = cmd.arg(split.flag());
        }
        cmd = Self::with_dir(cmd, dir);
        cmd = cmd.args(["-F", "#{pane_id}"]);
        Ok(self.executor.execute(&cmd)?)
    }

    /// Type `keys` literally into the target, then press Enter.
    pub fn send_keys(&self, target: &Target, keys: &str) -> Result<(), TmuxError> {
        let base = self
            .command()
            .args(["send-keys", "-t"])
            .arg(target.to_string());
        let literal = base.clone().args(["-l", keys]);
        let result = self.executor.execute_silently(&literal);
        // Enter is sent even when the literal keys were rejected
        let _ = self.executor.execute_silently(&base.arg("Enter"));
        Ok(result?)
    }

    pub fn kill_window(&self, target: &Target) -> Result<(), TmuxError> {
        let cmd = self
            .command()
            .args(["kill-window", "-t"])
            .arg(target.to_string());
        self.executor.execute(&cmd)?;
        Ok(())
    }

    pub fn kill_session(&self, target: &Target) -> Result<(), TmuxError> {
        let cmd = self
            .command()
            .args(["kill-session", "-t"])
            .arg(target.to_string());
        self.executor.execute(&cmd)?;
        Ok(())
    }

    /// Attach the terminal to `session`, detaching other clients.
    pub fn attach(&self, session: &str) -> Result<(), TmuxError> {
        let cmd = self.command().args(["attach", "-d", "-t", session]);
        Ok(self.executor.execute_silently(&cmd)?)
    }

    /// Point the current tmux client at `session`.
    pub fn switch_client(&self, session: &str) -> Result<(), TmuxError> {
        let cmd = self.command().args(["switch-client", "-t", session]);
        Ok(self.executor.execute_silently(&cmd)?)
    }

    /// Whether a session named `name` exists.
    ///
    /// `has-session` prints nothing on success. Any output or failure means
    /// the session is absent.
    pub fn session_exists(&self, name: &str) -> bool {
        let cmd = self
            .command()
            .args(["has-session", "-t"])
            .arg(Target::session(name).to_string());
        matches!(self.executor.execute(&cmd), Ok(output) if output.is_empty())
    }

    /// Name of the session the caller is running in.
    pub fn session_name(&self) -> Result<String, TmuxError> {
        let cmd = self.command().args(["display-message", "-p", "#S"]);
        Ok(self.executor.execute(&cmd)?)
    }

    pub fn set_env(&self, session: &str, key: &str, value: &str) -> Result<(), TmuxError> {
        let cmd = self.command().args(["setenv", "-t", session, key, value]);
        self.executor.execute(&cmd)?;
        Ok(())
    }

    /// Close gaps in a session's window indexes.
    pub fn renumber_windows(&self, session: &str) -> Result<(), TmuxError> {
        let cmd = self
            .command()
            .args(["move-window", "-r", "-s", session, "-t", session]);
        Ok(self.executor.execute_silently(&cmd)?)
    }

    pub fn select_layout(&self, target: &Target, layout: &str) -> Result<(), TmuxError> {
        let cmd = self
            .command()
            .args(["select-layout", "-t"])
            .arg(target.to_string())
            .arg(layout);
        self.executor.execute(&cmd)?;
        Ok(())
    }

    pub fn select_window(&self, target: &Target) -> Result<(), TmuxError> {
        let cmd = self
            .command()
            .args(["select-window", "-t"])
            .arg(target.to_string());
        Ok(self.executor.execute_silently(&cmd)?)
    }

    pub fn select_pane(&self, target: &Target) -> Result<(), TmuxError> {
        let cmd = self
            .command()
            .args(["select-pane", "-t"])
            .arg(target.to_string());
        Ok(self.executor.execute_silently(&cmd)?)
    }

    pub fn list_sessions(&self) -> Result<Vec<SessionInfo>, TmuxError> {
        let cmd = self
            .command()
            .args(["list-sessions", "-F"])
            .arg(SessionInfo::format());
        parse_output(&self.executor.execute(&cmd)?)
    }

    pub fn list_windows(&self, target: &Target) -> Result<Vec<WindowInfo>, TmuxError> {
        let cmd = self
            .command()
            .args(["list-windows", "-t"])
            .arg(target.to_string())
            .arg("-F")
            .arg(WindowInfo::format());
        parse_output(&self.executor.execute(&cmd)?)
    }

    pub fn list_panes(&self, target: &Target) -> Result<Vec<PaneInfo>, TmuxError> {
        let cmd = self
            .command()
            .args(["list-panes", "-t"])
            .arg(target.to_string())
            .arg("-F")
            .arg(PaneInfo::format());
        parse_output(&self.executor.execute(&cmd)?)
    }
}
