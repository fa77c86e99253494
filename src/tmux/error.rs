// ABOUTME: Error types for the tmux command gateway
// Defines malformed-output conditions and wraps process execution failures

use crate::shell::ShellError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("invalid tmux output format: expected {expected} columns, got {actual} in {line:?}")]
    InvalidOutputFormat {
        expected: usize,
        actual: usize,
        line: String,
    },

    #[error("invalid value {value:?} for tmux field {field}")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Shell(#[from] ShellError),
}
