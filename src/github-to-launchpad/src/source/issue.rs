//! Issue and comment snapshots read from GitHub.

use chrono::{DateTime, Utc};
use octocrab::models::issues;

/// A GitHub issue, captured read-only for migration.
#[derive(Debug, Clone)]
pub struct Issue {
    /// Issue number within the repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Plain-text rendering of the issue body, or the raw Markdown when
    /// GitHub did not supply one. Empty when the issue has no body.
    pub body: String,

    /// When the issue was opened.
    pub created_at: DateTime<Utc>,

    /// Login of the user who opened the issue.
    pub author: String,

    /// Web URL of the issue.
    pub html_url: String,

    /// Label names in the order GitHub returns them.
    pub labels: Vec<String>,

    /// Number of comments GitHub reports for the issue.
    pub comment_count: u32,

    /// Comments in source order. Filled in by the migration driver.
    pub comments: Vec<Comment>,
}

/// A single comment on an issue.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Login of the comment author.
    pub author: String,

    /// When the comment was posted.
    pub created_at: DateTime<Utc>,

    /// Raw comment body.
    pub body: String,
}

impl Issue {
    /// Attaches the issue's comments.
    #[must_use]
    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }
}

impl From<issues::Issue> for Issue {
    fn from(issue: issues::Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            body: issue_body(issue.body_text, issue.body),
            created_at: issue.created_at,
            author: issue.user.login,
            html_url: issue.html_url.to_string(),
            labels: issue.labels.into_iter().map(|label| label.name).collect(),
            comment_count: issue.comments,
            comments: Vec::new(),
        }
    }
}

/// Prefers GitHub's plain-text rendering over the Markdown source.
fn issue_body(text: Option<String>, markdown: Option<String>) -> String {
    text.or(markdown).unwrap_or_default()
}

impl From<issues::Comment> for Comment {
    fn from(comment: issues::Comment) -> Self {
        Self {
            author: comment.user.login,
            created_at: comment.created_at,
            body: comment.body.unwrap_or_default(),
        }
    }
}
