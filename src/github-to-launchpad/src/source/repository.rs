//! Repository references in "owner/name" form.

use super::SourceError;
use std::fmt;
use std::str::FromStr;

/// A GitHub repository named by its owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl FromStr for RepositoryRef {
    type Err = SourceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || SourceError::InvalidRepository {
            value: value.to_string(),
        };

        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
