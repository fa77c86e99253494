// ABOUTME: tmux command gateway
// Builds target-addressed invocations and decodes tabular tmux output into typed records

pub mod client;
pub mod error;
pub mod format;
pub mod split;
pub mod target;

pub use client::TmuxClient;
pub use error::TmuxError;
pub use format::{PaneInfo, SessionInfo, TmuxRecord, WindowInfo, COLUMN_SEP};
pub use split::{InvalidSplitType, SplitType};
pub use target::Target;
