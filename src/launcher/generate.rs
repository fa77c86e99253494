// ABOUTME: Rebuilds a session configuration from a running tmux session
// The first pane of each window is the window itself; later panes become splits

use super::{LaunchError, Launcher};
use crate::config::{Config, Pane, Window};
use crate::shell::Executor;
use crate::tmux::Target;
use std::path::Path;

impl<E: Executor> Launcher<E> {
    /// Describe the live session `session` (the caller's own when `None`).
    pub fn generate_config(&self, session: Option<&str>) -> Result<Config, LaunchError> {
        let name = match session {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.tmux.session_name()?,
        };
        let shell = std::env::var("SHELL")
            .ok()
            .and_then(|shell| {
                Path::new(&shell)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        let target = Target::session(&name);
        let mut config = Config {
            session: name,
            ..Config::default()
        };

        for info in self.tmux.list_windows(&target)? {
            let panes = self
                .tmux
                .list_panes(&target.clone().with_window(&info.id))?;

            if config.path.is_empty() {
                config.path.clone_from(&info.path);
            }
            let mut window = Window {
                name: info.name,
                layout: info.layout,
                ..Window::default()
            };
            if info.path != config.path {
                window.path.clone_from(&info.path);
            }

            let mut panes = panes.into_iter();
            if let Some(first) = panes.next() {
                if first.command != shell {
                    window.cmd = first.command;
                }
            }
            for live in panes {
                let mut pane = Pane::default();
                if live.path != info.path {
                    pane.path = live.path;
                }
                if live.command != shell {
                    pane.cmd = live.command;
                }
                window.panes.push(pane);
            }
            // A single-pane window needs no layout to be reproduced.
            if window.panes.is_empty() {
                window.layout.clear();
            }
            config.windows.push(window);
        }
        Ok(config)
    }
}
