// ABOUTME: Declarative session configuration
// Interpolates variables, expands !include fragments and decodes the session/window/pane tree

pub mod directory;
pub mod error;
pub mod include;
pub mod interpolate;
pub mod loader;
pub mod model;
pub mod scalar;

pub use directory::resolve_dir;
pub use error::ConfigError;
pub use include::{resolve_includes, IncludeResolver};
pub use interpolate::interpolate;
pub use loader::{
    config_dir, find_config, list_configs, load_config, render_config, DEFAULT_COMMAND_DELAY_MS,
    DEFAULT_CONFIG_FILE, ENV_CONFIG_PATH, ENV_SESSION,
};
pub use model::{Config, Pane, Window};
