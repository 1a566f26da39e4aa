//! Per-issue migration results.

/// Outcome of processing a single issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationResult {
    /// A bug was filed for the issue.
    Migrated {
        /// GitHub issue number.
        issue_number: u64,
        /// Web link of the new Launchpad bug.
        bug_link: String,
    },

    /// Launchpad refused to create the bug.
    Failed {
        /// GitHub issue number.
        issue_number: u64,
        /// GitHub issue URL.
        issue_url: String,
        /// Error message.
        error: String,
    },

    /// The issue was filtered out by the skip threshold.
    Skipped {
        /// GitHub issue number.
        issue_number: u64,
    },

    /// Dry run: the description was rendered but nothing was filed.
    Previewed {
        /// GitHub issue number.
        issue_number: u64,
    },
}

impl MigrationResult {
    /// Returns the GitHub issue number the result belongs to.
    #[must_use]
    pub fn issue_number(&self) -> u64 {
        match self {
            Self::Migrated { issue_number, .. }
            | Self::Failed { issue_number, .. }
            | Self::Skipped { issue_number }
            | Self::Previewed { issue_number } => *issue_number,
        }
    }

    /// The line shown to the operator, if the result has one.
    ///
    /// Skipped issues print nothing.
    #[must_use]
    pub fn report_line(&self) -> Option<String> {
        match self {
            Self::Migrated {
                issue_number,
                bug_link,
            } => Some(format!("Migrating GH#{issue_number} to {bug_link}")),
            Self::Failed { issue_url, .. } => Some(format!(
                "Could not create bug on LaunchPad for {issue_url}"
            )),
            Self::Skipped { .. } | Self::Previewed { .. } => None,
        }
    }
}
