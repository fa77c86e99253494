// ABOUTME: Session, window and pane configuration tree decoded from YAML

use super::loader::DEFAULT_COMMAND_DELAY_MS;
use super::{resolve_dir, scalar};
use crate::shell::expand_path;
use crate::tmux::{InvalidSplitType, SplitType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn is_default_delay(delay: &u64) -> bool {
    *delay == DEFAULT_COMMAND_DELAY_MS
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A session and everything it owns, including nested sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(deserialize_with = "scalar::string")]
    pub session: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "scalar::string_map")]
    pub env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "scalar::string")]
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "scalar::string_list")]
    pub before: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "scalar::string_list")]
    pub after: Vec<String>,
    pub windows: Vec<Window>,
    /// Milliseconds to wait before each command is typed into a window or pane.
    #[serde(skip_serializing_if = "is_default_delay")]
    pub command_delay: u64,
    /// Prefix sent commands with a space so shells keep them out of history.
    #[serde(skip_serializing_if = "is_false")]
    pub suppress_history: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sessions: Vec<Config>,
    /// File this session was read from, set by the loader or an include.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "scalar::string")]
    pub config_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: String::new(),
            env: BTreeMap::new(),
            path: String::new(),
            before: Vec::new(),
            after: Vec::new(),
            windows: Vec::new(),
            command_delay: DEFAULT_COMMAND_DELAY_MS,
            suppress_history: false,
            sessions: Vec::new(),
            config_path: String::new(),
        }
    }
}

impl Config {
    /// Directory containing the source file, or `cwd` when the session was
    /// not read from a file.
    pub fn source_dir(&self, cwd: &Path) -> PathBuf {
        if self.config_path.is_empty() {
            return cwd.to_path_buf();
        }
        expand_path(&self.config_path)
            .parent()
            .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf)
    }

    /// Resolved start directory of the session.
    pub fn session_dir(&self, cwd: &Path) -> PathBuf {
        resolve_dir(&self.path, &self.source_dir(cwd), cwd)
    }

    /// Apply `suppress_history` to a command about to be typed.
    pub fn prepare_command(&self, command: &str) -> String {
        if self.suppress_history {
            format!(" {command}")
        } else {
            command.to_string()
        }
    }
}

/// A window inside a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    #[serde(deserialize_with = "scalar::string")]
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "scalar::string_list")]
    pub before: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub panes: Vec<Pane>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "scalar::string")]
    pub layout: String,
    #[serde(skip_serializing_if = "is_false")]
    pub focus: bool,
    /// Only started when requested by name.
    #[serde(skip_serializing_if = "is_false")]
    pub manual: bool,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "scalar::string")]
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "scalar::string_list")]
    pub commands: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "scalar::string")]
    pub cmd: String,
}

impl Window {
    /// `commands` followed by `cmd`.
    pub fn command_sequence(&self) -> Vec<String> {
        merge_commands(&self.commands, &self.cmd)
    }
}

/// A split inside a window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pane {
    #[serde(
        rename = "type",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "scalar::string"
    )]
    pub split: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "scalar::string")]
    pub path: String,
    #[serde(skip_serializing_if = "is_false")]
    pub focus: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "scalar::string_list")]
    pub commands: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "scalar::string")]
    pub cmd: String,
}

impl Pane {
    /// `commands` followed by `cmd`.
    pub fn command_sequence(&self) -> Vec<String> {
        merge_commands(&self.commands, &self.cmd)
    }

    /// Requested orientation; vertical when unset.
    pub fn split_type(&self) -> Result<SplitType, InvalidSplitType> {
        if self.split.is_empty() {
            Ok(SplitType::default())
        } else {
            self.split.parse()
        }
    }
}

fn merge_commands(commands: &[String], cmd: &str) -> Vec<String> {
    let mut merged = commands.to_vec();
    if !cmd.is_empty() {
        merged.push(cmd.to_string());
    }
    merged
}
