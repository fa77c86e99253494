// ABOUTME: Process execution boundary for external commands
// Builds command lines, runs them through an Executor and expands user paths

pub mod command;
pub mod error;
pub mod executor;
pub mod path;

pub use command::ShellCommand;
pub use error::ShellError;
pub use executor::{Executor, SystemExecutor};
pub use path::expand_path;
