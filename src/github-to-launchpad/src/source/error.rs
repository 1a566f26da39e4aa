//! Source tracker error types.

use thiserror::Error;

/// Errors that can occur while reading issues from GitHub.
#[derive(Debug, Error)]
pub enum SourceError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Repository argument was not in "owner/name" form.
    #[error("Invalid repository '{value}': expected owner/name")]
    InvalidRepository { value: String },
}
