//! Migrates issues into Launchpad bugs one at a time.

mod error;
mod options;

pub use error::MigrationError;
pub use options::{should_skip, MigrationOptions};

use crate::launchpad::{BugTracker, Distribution, NewBug};
use crate::source::{Issue, IssueSource};
use crate::summary::{MigrationResult, RunSummary};
use crate::templates::{generate_bug_title, DescriptionRenderer};
use std::io::Write;
use tracing::{debug, info, info_span, warn, Instrument};

/// Number of description lines shown per issue in dry-run mode.
const PREVIEW_LINES: usize = 10;

/// Copies issues from a source into bugs on a distribution.
pub struct Migrator<'a, S, T> {
    source: &'a S,
    tracker: &'a T,
    distribution: &'a Distribution,
    renderer: &'a DescriptionRenderer,
    options: MigrationOptions,
}

impl<'a, S, T> Migrator<'a, S, T>
where
    S: IssueSource,
    T: BugTracker,
{
    /// Creates a migrator over resolved handles.
    #[must_use]
    pub fn new(
        source: &'a S,
        tracker: &'a T,
        distribution: &'a Distribution,
        renderer: &'a DescriptionRenderer,
        options: MigrationOptions,
    ) -> Self {
        Self {
            source,
            tracker,
            distribution,
            renderer,
            options,
        }
    }

    /// Migrates every qualifying issue, writing one line per issue to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError`] if issues cannot be listed, a description
    /// cannot be rendered, Launchpad cannot be reached, or `out` fails.
    /// Launchpad refusing an individual bug is reported and skipped over.
    pub async fn migrate<W: Write>(&self, out: &mut W) -> Result<RunSummary, MigrationError> {
        let mut summary = RunSummary::new(self.options.dry_run);
        let issues = self.source.issues(self.options.state).await?;

        info!(
            count = issues.len(),
            state = %self.options.state,
            skip_until = ?self.options.skip_until,
            distribution = %self.distribution.name,
            "Migrating issues"
        );

        for issue in issues {
            let result = self.process_issue(issue, out).await?;
            debug!(issue_number = result.issue_number(), outcome = ?result, "Issue processed");
            if let Some(line) = result.report_line() {
                writeln!(out, "{line}")?;
            }
            summary.record_result(&result);
        }

        Ok(summary)
    }

    async fn process_issue<W: Write>(
        &self,
        issue: Issue,
        out: &mut W,
    ) -> Result<MigrationResult, MigrationError> {
        let span = info_span!("migrate_issue", issue_number = issue.number);

        async {
            if should_skip(issue.number, self.options.skip_until) {
                debug!("Issue is past the skip threshold");
                return Ok(MigrationResult::Skipped {
                    issue_number: issue.number,
                });
            }

            let comments = if issue.comment_count > 0 {
                self.source.comments(&issue).await?
            } else {
                Vec::new()
            };
            let issue = issue.with_comments(comments);

            let title = generate_bug_title(&issue);
            let description = self.renderer.render_description(&issue)?;

            if self.options.dry_run {
                print_preview(out, &issue, &description)?;
                return Ok(MigrationResult::Previewed {
                    issue_number: issue.number,
                });
            }

            let bug = NewBug::public(&title, &description, self.distribution);
            match self.tracker.create_bug(&bug).await {
                Ok(created) => {
                    info!(bug_id = created.id, "Bug created");
                    Ok(MigrationResult::Migrated {
                        issue_number: issue.number,
                        bug_link: created.web_link,
                    })
                }
                Err(e) if e.is_http_failure() => {
                    warn!(error = %e, status = ?e.status(), "Failed to create bug");
                    Ok(MigrationResult::Failed {
                        issue_number: issue.number,
                        issue_url: issue.html_url.clone(),
                        error: e.to_string(),
                    })
                }
                Err(e) => Err(e.into()),
            }
        }
        .instrument(span)
        .await
    }
}

fn print_preview<W: Write>(out: &mut W, issue: &Issue, description: &str) -> std::io::Result<()> {
    writeln!(out, "Would migrate GH#{}: {}", issue.number, issue.title)?;
    for line in description.lines().take(PREVIEW_LINES) {
        writeln!(out, "    {line}")?;
    }
    if description.lines().count() > PREVIEW_LINES {
        writeln!(out, "    ...")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launchpad::{Bug, LaunchpadError};
    use crate::source::{Comment, IssueState, SourceError};
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    struct FakeSource {
        issues: Vec<Issue>,
        comment_requests: Mutex<Vec<u64>>,
    }

    impl FakeSource {
        fn with_numbers(numbers: &[u64]) -> Self {
            Self {
                issues: numbers.iter().map(|n| issue(*n, 0)).collect(),
                comment_requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl IssueSource for FakeSource {
        async fn issues(&self, _state: IssueState) -> Result<Vec<Issue>, SourceError> {
            Ok(self.issues.clone())
        }

        async fn comments(&self, issue: &Issue) -> Result<Vec<Comment>, SourceError> {
            self.comment_requests.lock().unwrap().push(issue.number);
            Ok((0..issue.comment_count)
                .map(|i| Comment {
                    author: format!("commenter{i}"),
                    created_at: Utc.with_ymd_and_hms(2014, 6, 2, 0, 0, 0).unwrap(),
                    body: format!("comment {i} on #{}", issue.number),
                })
                .collect())
        }
    }

    #[derive(Default)]
    struct FakeTracker {
        created: Mutex<Vec<(String, String)>>,
        reject_titles: Vec<String>,
        unreachable: bool,
    }

    impl BugTracker for FakeTracker {
        async fn create_bug(&self, bug: &NewBug<'_>) -> Result<Bug, LaunchpadError> {
            assert!(!bug.private);
            if self.unreachable {
                return Err(LaunchpadError::UnexpectedResponse {
                    endpoint: "bugs".to_string(),
                    message: "connection reset".to_string(),
                });
            }
            if self.reject_titles.iter().any(|t| t == bug.title) {
                return Err(LaunchpadError::Http {
                    status: 500,
                    endpoint: "bugs".to_string(),
                    message: "Internal Server Error".to_string(),
                });
            }

            let mut created = self.created.lock().unwrap();
            created.push((bug.title.to_string(), bug.description.to_string()));
            let id = 1_400_000 + created.len() as u64;
            Ok(Bug {
                id,
                title: bug.title.to_string(),
                web_link: format!("https://bugs.launchpad.net/openstack-ansible/+bug/{id}"),
            })
        }
    }

    impl FakeTracker {
        fn created_titles(&self) -> Vec<String> {
            self.created
                .lock()
                .unwrap()
                .iter()
                .map(|(title, _)| title.clone())
                .collect()
        }
    }

    fn issue(number: u64, comment_count: u32) -> Issue {
        Issue {
            number,
            title: format!("Issue {number}"),
            body: format!("Body of issue {number}"),
            created_at: Utc.with_ymd_and_hms(2014, 6, 1, 12, 0, 0).unwrap(),
            author: "reporter".to_string(),
            html_url: format!("https://github.com/rcbops/ansible-lxc-rpc/issues/{number}"),
            labels: vec!["bug".to_string()],
            comment_count,
            comments: Vec::new(),
        }
    }

    fn distribution() -> Distribution {
        Distribution {
            name: "openstack-ansible".to_string(),
            display_name: "OpenStack-Ansible".to_string(),
            self_link: "https://api.launchpad.net/1.0/openstack-ansible".to_string(),
            web_link: "https://launchpad.net/openstack-ansible".to_string(),
            resource_type_link: "https://api.launchpad.net/1.0/#distribution".to_string(),
        }
    }

    async fn run(
        source: &FakeSource,
        tracker: &FakeTracker,
        options: MigrationOptions,
    ) -> (Result<RunSummary, MigrationError>, String) {
        let distribution = distribution();
        let renderer = DescriptionRenderer::new();
        let migrator = Migrator::new(source, tracker, &distribution, &renderer, options);

        let mut out = Vec::new();
        let result = migrator.migrate(&mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn migrates_every_issue_in_order() {
        let source = FakeSource::with_numbers(&[1, 2, 3]);
        let tracker = FakeTracker::default();

        let (result, output) = run(&source, &tracker, MigrationOptions::default()).await;
        let summary = result.unwrap();

        assert_eq!(tracker.created_titles(), vec!["Issue 1", "Issue 2", "Issue 3"]);
        assert_eq!(summary.bugs_created, 3);
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec![
                "Migrating GH#1 to https://bugs.launchpad.net/openstack-ansible/+bug/1400001",
                "Migrating GH#2 to https://bugs.launchpad.net/openstack-ansible/+bug/1400002",
                "Migrating GH#3 to https://bugs.launchpad.net/openstack-ansible/+bug/1400003",
            ]
        );
    }

    #[tokio::test]
    async fn skip_until_keeps_only_lower_numbers() {
        let source = FakeSource::with_numbers(&[1, 2, 3, 4, 5]);
        let tracker = FakeTracker::default();
        let options = MigrationOptions {
            skip_until: Some(3),
            ..Default::default()
        };

        let (result, output) = run(&source, &tracker, options).await;
        let summary = result.unwrap();

        assert_eq!(tracker.created_titles(), vec!["Issue 1", "Issue 2"]);
        assert_eq!(summary.issues_seen, 5);
        assert_eq!(summary.issues_skipped, 3);
        assert_eq!(output.lines().count(), 2);
    }

    #[tokio::test]
    async fn http_failure_is_reported_and_run_continues() {
        let source = FakeSource::with_numbers(&[1, 2, 3]);
        let tracker = FakeTracker {
            reject_titles: vec!["Issue 2".to_string()],
            ..Default::default()
        };

        let (result, output) = run(&source, &tracker, MigrationOptions::default()).await;
        let summary = result.unwrap();

        assert_eq!(tracker.created_titles(), vec!["Issue 1", "Issue 3"]);
        assert_eq!(summary.bugs_failed, 1);
        assert!(summary.has_failures());

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(
            lines[1],
            "Could not create bug on LaunchPad for https://github.com/rcbops/ansible-lxc-rpc/issues/2"
        );
        assert!(lines[2].starts_with("Migrating GH#3 to "));
    }

    #[tokio::test]
    async fn non_http_failure_aborts_run() {
        let source = FakeSource::with_numbers(&[1, 2]);
        let tracker = FakeTracker {
            unreachable: true,
            ..Default::default()
        };

        let (result, output) = run(&source, &tracker, MigrationOptions::default()).await;

        assert!(matches!(result, Err(MigrationError::Launchpad(_))));
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn comments_are_fetched_only_when_needed() {
        let source = FakeSource {
            issues: vec![issue(1, 2), issue(2, 0), issue(3, 1)],
            comment_requests: Mutex::new(Vec::new()),
        };
        let tracker = FakeTracker::default();
        let options = MigrationOptions {
            skip_until: Some(3),
            ..Default::default()
        };

        let (result, _) = run(&source, &tracker, options).await;
        result.unwrap();

        assert_eq!(*source.comment_requests.lock().unwrap(), vec![1]);

        let created = tracker.created.lock().unwrap();
        let (_, description) = &created[0];
        assert_eq!(description.matches("Comment created by").count(), 2);
        assert!(description.find("comment 0").unwrap() < description.find("comment 1").unwrap());
    }

    #[tokio::test]
    async fn dry_run_creates_nothing() {
        let source = FakeSource::with_numbers(&[7]);
        let tracker = FakeTracker::default();
        let options = MigrationOptions {
            dry_run: true,
            ..Default::default()
        };

        let (result, output) = run(&source, &tracker, options).await;
        let summary = result.unwrap();

        assert!(tracker.created_titles().is_empty());
        assert_eq!(summary.issues_previewed, 1);
        assert!(output.starts_with("Would migrate GH#7: Issue 7\n"));
        assert!(output.contains("    Opened by reporter on 2014-06-01 12:00:00+00:00"));
    }
}
