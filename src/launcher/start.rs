// ABOUTME: Start pass: create missing sessions, windows and panes, then attach
// Nested sessions are started before their parent; an existing session is left untouched

use super::{current_dir, LaunchError, Launcher};
use crate::config::{resolve_dir, Config, Window};
use crate::shell::Executor;
use crate::tmux::Target;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

impl<E: Executor> Launcher<E> {
    /// Start `config` and its nested sessions, then attach or switch to it.
    ///
    /// A non-empty `windows` restricts the pass to the named windows (manual
    /// ones included) and adds them to sessions that already run.
    ///
    /// The first declared window is not created with `new-window` when this
    /// pass created the session: it takes over the window `new-session`
    /// opened, by name, or by id from `list-windows` when unnamed. In a
    /// session that already runs every requested window is created.
    pub fn start(&self, config: &Config, windows: &[String]) -> Result<(), LaunchError> {
        if self.options.inside && !self.in_session {
            return Err(LaunchError::NotInsideSession);
        }
        let cwd = current_dir()?;

        self.start_tree(config, windows, &cwd)?;

        if self.options.detach || self.options.inside {
            return Ok(());
        }
        self.switch_or_attach(&config.session)
    }

    fn start_tree(
        &self,
        config: &Config,
        windows: &[String],
        cwd: &Path,
    ) -> Result<(), LaunchError> {
        for nested in &config.sessions {
            self.start_tree(nested, windows, cwd)?;
        }
        self.start_session(config, windows, cwd)
    }

    fn start_session(
        &self,
        session: &Config,
        windows: &[String],
        cwd: &Path,
    ) -> Result<(), LaunchError> {
        if session.session.is_empty() {
            return Err(LaunchError::NoSessionName);
        }
        let name = if self.options.inside {
            self.tmux.session_name()?
        } else {
            session.session.clone()
        };
        let session_dir = session.session_dir(cwd);
        let exists = self.tmux.session_exists(&name);

        let created = if self.options.inside {
            false
        } else if !exists {
            self.run_hooks(&session.before, &session_dir)?;
            let first_window = session.windows.first().map_or("", |w| w.name.as_str());
            self.tmux
                .new_session(&session.session, &session_dir, first_window)?;
            self.set_env(&session.session, &session.env)?;
            info!(session = %name, dir = %session_dir.display(), "created session");
            true
        } else if windows.is_empty() {
            info!(session = %name, "session already running");
            return Ok(());
        } else {
            false
        };

        let session_target = Target::session(&name);
        for (index, window) in session.windows.iter().enumerate() {
            if !is_selected(window, windows) {
                continue;
            }
            let window_dir = resolve_dir(&window.path, &session_dir, cwd);

            // The session's auto-created window stands in for the first declared one.
            let window_id = if created && index == 0 {
                if window.name.is_empty() {
                    self.tmux
                        .list_windows(&session_target)?
                        .into_iter()
                        .next()
                        .map(|w| w.id)
                        .ok_or_else(|| LaunchError::NoWindowsFound(name.clone()))?
                } else {
                    window.name.clone()
                }
            } else {
                self.tmux
                    .new_window(&session_target, &window.name, &window_dir)?
            };
            let window_target = session_target.clone().with_window(window_id);

            if window.focus {
                self.tmux.select_window(&window_target)?;
            }
            self.send_commands(session, &window_target, &window.command_sequence());

            for pane in &window.panes {
                let pane_dir = resolve_dir(&pane.path, &window_dir, cwd);
                let split = match pane.split_type() {
                    Ok(split) => Some(split),
                    Err(err) => {
                        warn!(window = %window_target, %err, "ignoring pane split type");
                        None
                    }
                };
                let pane_id = self.tmux.new_pane(&window_target, &pane_dir, split)?;
                let pane_target = window_target.clone().with_pane(pane_id);

                self.send_commands(session, &pane_target, &pane.command_sequence());
                if pane.focus {
                    self.tmux.select_pane(&pane_target)?;
                }
            }

            if !window.layout.is_empty() {
                self.tmux.select_layout(&window_target, &window.layout)?;
            }
        }
        Ok(())
    }

    /// Type each command into `target`. A failed send is reported and skipped.
    fn send_commands(&self, session: &Config, target: &Target, commands: &[String]) {
        let delay = Duration::from_millis(session.command_delay);
        for command in commands {
            thread::sleep(delay);
            let keys = session.prepare_command(command);
            if let Err(err) = self.tmux.send_keys(target, &keys) {
                warn!(target = %target, command = %command, %err, "failed to send command");
            }
        }
    }
}

/// Whether `window` takes part in a start pass restricted to `requested`.
fn is_selected(window: &Window, requested: &[String]) -> bool {
    if requested.is_empty() {
        !window.manual
    } else {
        requested.iter().any(|name| *name == window.name)
    }
}
