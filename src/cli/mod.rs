// ABOUTME: Command-line surface of the loom binary
// Parses arguments with clap and dispatches to the library's loader and launcher

pub mod args;
pub mod commands;
pub mod project;
pub mod tree;

pub use args::{shim_args, Cli};
pub use commands::run;
