// ABOUTME: Library crate for tmux-loom exposing the config loader, tmux gateway and launcher

pub mod config;
pub mod launcher;
pub mod shell;
pub mod tmux;

pub use config::{load_config, render_config, Config, ConfigError, Pane, Window};
pub use launcher::{LaunchError, Launcher, Options};
pub use shell::{Executor, ShellCommand, ShellError, SystemExecutor};
pub use tmux::{Target, TmuxClient, TmuxError};
