// ABOUTME: Pane split orientation accepted by split-window

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitType {
    #[default]
    Vertical,
    Horizontal,
}

impl SplitType {
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Vertical => "-v",
            Self::Horizontal => "-h",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid split type: {0}")]
pub struct InvalidSplitType(pub String);

impl FromStr for SplitType {
    type Err = InvalidSplitType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v" | "-v" | "vertical" => Ok(Self::Vertical),
            "h" | "-h" | "horizontal" => Ok(Self::Horizontal),
            other => Err(InvalidSplitType(other.to_string())),
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}
