// ABOUTME: Positional decoding of tmux -F output into typed records
// Each record type owns a fixed, ordered column list; no reflection involved

use super::TmuxError;
use chrono::{DateTime, TimeZone, Utc};

/// Column separator placed between format variables. Unlikely to appear in
/// session names, paths or commands.
pub const COLUMN_SEP: &str = "§";

/// A row of tmux `-F` output with a static column order.
pub trait TmuxRecord: Sized {
    /// tmux format variable names, in column order.
    const FIELDS: &'static [&'static str];

    /// Build the record from one column per entry of `FIELDS`; any other
    /// count is an [`TmuxError::InvalidOutputFormat`].
    fn from_columns(columns: &[&str]) -> Result<Self, TmuxError>;

    /// The `-F` argument requesting `FIELDS` joined by [`COLUMN_SEP`].
    fn format() -> String {
        Self::FIELDS
            .iter()
            .map(|field| format!("#{{{field}}}"))
            .collect::<Vec<_>>()
            .join(COLUMN_SEP)
    }
}

/// Decode one line into a record, rejecting any column count mismatch.
pub fn parse_line<T: TmuxRecord>(line: &str) -> Result<T, TmuxError> {
    let columns: Vec<&str> = line.split(COLUMN_SEP).collect();
    T::from_columns(&columns)
}

fn check_columns<T: TmuxRecord>(columns: &[&str]) -> Result<(), TmuxError> {
    if columns.len() == T::FIELDS.len() {
        return Ok(());
    }
    Err(TmuxError::InvalidOutputFormat {
        expected: T::FIELDS.len(),
        actual: columns.len(),
        line: columns.join(COLUMN_SEP),
    })
}

/// Decode every line of `output`. Empty output yields no records.
pub fn parse_output<T: TmuxRecord>(output: &str) -> Result<Vec<T>, TmuxError> {
    if output.is_empty() {
        return Ok(Vec::new());
    }
    output.lines().map(parse_line).collect()
}

fn parse_flag(value: &str) -> bool {
    value == "1"
}

fn parse_count(field: &'static str, value: &str) -> Result<usize, TmuxError> {
    value.parse().map_err(|_| TmuxError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn parse_epoch(field: &'static str, value: &str) -> Result<Option<DateTime<Utc>>, TmuxError> {
    if value.is_empty() {
        return Ok(None);
    }
    let invalid = || TmuxError::InvalidField {
        field,
        value: value.to_string(),
    };
    let seconds: i64 = value.parse().map_err(|_| invalid())?;
    Utc.timestamp_opt(seconds, 0).single().map(Some).ok_or_else(invalid)
}

/// A live tmux session as reported by `list-sessions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: String,
    pub name: String,
    pub path: String,
    pub attached: bool,
    pub marked: bool,
    pub windows: usize,
    pub stack: String,
    pub alerts: String,
    pub created: Option<DateTime<Utc>>,
    pub activity: Option<DateTime<Utc>>,
    pub last_attached: Option<DateTime<Utc>>,
}

impl TmuxRecord for SessionInfo {
    const FIELDS: &'static [&'static str] = &[
        "session_id",
        "session_name",
        "session_path",
        "session_attached",
        "session_marked",
        "session_windows",
        "session_stack",
        "session_alerts",
        "session_created",
        "session_activity",
        "session_last_attached",
    ];

    fn from_columns(columns: &[&str]) -> Result<Self, TmuxError> {
        check_columns::<Self>(columns)?;
        Ok(Self {
            id: columns[0].to_string(),
            name: columns[1].to_string(),
            path: columns[2].to_string(),
            // session_attached is a client count in newer tmux releases
            attached: columns[3] != "0" && !columns[3].is_empty(),
            marked: parse_flag(columns[4]),
            windows: parse_count("session_windows", columns[5])?,
            stack: columns[6].to_string(),
            alerts: columns[7].to_string(),
            created: parse_epoch("session_created", columns[8])?,
            activity: parse_epoch("session_activity", columns[9])?,
            last_attached: parse_epoch("session_last_attached", columns[10])?,
        })
    }
}

/// A window as reported by `list-windows`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: String,
    pub name: String,
    pub layout: String,
    pub path: String,
}

impl TmuxRecord for WindowInfo {
    const FIELDS: &'static [&'static str] =
        &["window_id", "window_name", "window_layout", "pane_current_path"];

    fn from_columns(columns: &[&str]) -> Result<Self, TmuxError> {
        check_columns::<Self>(columns)?;
        Ok(Self {
            id: columns[0].to_string(),
            name: columns[1].to_string(),
            layout: columns[2].to_string(),
            path: columns[3].to_string(),
        })
    }
}

/// A pane as reported by `list-panes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    pub path: String,
    pub command: String,
}

impl TmuxRecord for PaneInfo {
    const FIELDS: &'static [&'static str] = &["pane_current_path", "pane_current_command"];

    fn from_columns(columns: &[&str]) -> Result<Self, TmuxError> {
        check_columns::<Self>(columns)?;
        Ok(Self {
            path: columns[0].to_string(),
            command: columns[1].to_string(),
        })
    }
}
