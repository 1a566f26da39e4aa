//! Migration options.

use crate::source::IssueState;

/// Options controlling which issues are migrated and how.
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationOptions {
    /// Issue state filter.
    pub state: IssueState,

    /// Issues numbered at or above this value are skipped.
    pub skip_until: Option<u64>,

    /// Render descriptions without creating bugs.
    pub dry_run: bool,
}

/// Returns true if the issue is filtered out by the skip threshold.
///
/// Every issue numbered `skip_until` or higher is skipped, so only issues
/// below the threshold are migrated. Without a threshold nothing is skipped.
#[must_use]
pub fn should_skip(issue_number: u64, skip_until: Option<u64>) -> bool {
    skip_until.is_some_and(|threshold| issue_number >= threshold)
}
