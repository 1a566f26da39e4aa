//! Run summary types.

use super::result::MigrationResult;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of issues returned by GitHub.
    pub issues_seen: usize,

    /// Number of issues filtered out by the skip threshold.
    pub issues_skipped: usize,

    /// Number of bugs successfully created.
    pub bugs_created: usize,

    /// Number of bugs Launchpad refused to create.
    pub bugs_failed: usize,

    /// Number of descriptions rendered in dry-run mode.
    pub issues_previewed: usize,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &MigrationResult) {
        self.issues_seen += 1;
        match result {
            MigrationResult::Migrated { .. } => self.bugs_created += 1,
            MigrationResult::Failed { .. } => self.bugs_failed += 1,
            MigrationResult::Skipped { .. } => self.issues_skipped += 1,
            MigrationResult::Previewed { .. } => self.issues_previewed += 1,
        }
    }

    /// Returns true if any bug could not be created.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.bugs_failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_record_result() {
        let mut summary = RunSummary::new(false);

        summary.record_result(&MigrationResult::Migrated {
            issue_number: 1,
            bug_link: "https://bugs.launchpad.net/bugs/1".to_string(),
        });
        summary.record_result(&MigrationResult::Skipped { issue_number: 2 });

        assert_eq!(summary.issues_seen, 2);
        assert_eq!(summary.bugs_created, 1);
        assert_eq!(summary.issues_skipped, 1);
        assert!(!summary.has_failures());

        summary.record_result(&MigrationResult::Failed {
            issue_number: 3,
            issue_url: "https://github.com/o/r/issues/3".to_string(),
            error: "boom".to_string(),
        });
        assert!(summary.has_failures());
    }
}
