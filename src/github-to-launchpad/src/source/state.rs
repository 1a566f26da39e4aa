//! Issue state filter.

use std::fmt;
use std::str::FromStr;

/// Selects which issues qualify for migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueState {
    /// Only open issues.
    #[default]
    Open,

    /// Only closed issues.
    Closed,

    /// Every issue regardless of state.
    All,
}

impl IssueState {
    /// Returns the state as used on the command line and in the GitHub API.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl FromStr for IssueState {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown issue state '{other}', accepted values: open, closed, all"
            )),
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
