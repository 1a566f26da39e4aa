//! Reading issues from the source tracker.
//!
//! [`IssueSource`] is the seam the migration driver reads through;
//! [`GitHubSource`] implements it on top of octocrab.

mod error;
mod issue;
mod repository;
mod state;

pub use error::SourceError;
pub use issue::{Comment, Issue};
pub use repository::RepositoryRef;
pub use state::IssueState;

use crate::rate_limit::ensure_core_rate_limit;
use octocrab::models::issues;
use octocrab::{Octocrab, Page};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Results per page for issue and comment listings.
const RESULTS_PER_PAGE: u8 = 100;

/// Media type that adds `body_text` and `body_html` to issue payloads.
const FULL_MEDIA_TYPE: &str = "application/vnd.github.full+json";

/// Query parameters for the repository issue listing.
#[derive(Debug, Serialize)]
struct IssueListParams {
    state: &'static str,
    sort: &'static str,
    direction: &'static str,
    per_page: u8,
}

impl IssueListParams {
    fn oldest_first(state: IssueState) -> Self {
        Self {
            state: state.as_str(),
            sort: "created",
            direction: "asc",
            per_page: RESULTS_PER_PAGE,
        }
    }
}

fn full_media_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(FULL_MEDIA_TYPE));
    headers
}

/// Read-only access to the issues of one repository.
#[allow(async_fn_in_trait)]
pub trait IssueSource {
    /// Lists issues in the given state, oldest first.
    async fn issues(&self, state: IssueState) -> Result<Vec<Issue>, SourceError>;

    /// Lists the comments of an issue in the order the tracker returns them.
    async fn comments(&self, issue: &Issue) -> Result<Vec<Comment>, SourceError>;
}

/// Issue source backed by a GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    octocrab: Octocrab,
    repository: RepositoryRef,
}

impl GitHubSource {
    /// Resolves a repository reference into a handle.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the repository cannot be fetched.
    pub async fn resolve(
        octocrab: Octocrab,
        repository: RepositoryRef,
    ) -> Result<Self, SourceError> {
        ensure_core_rate_limit(&octocrab).await?;
        let repo = octocrab
            .repos(&repository.owner, &repository.name)
            .get()
            .await?;
        info!(
            repo = %repository,
            full_name = repo.full_name.as_deref().unwrap_or_default(),
            "Resolved GitHub repository"
        );
        Ok(Self {
            octocrab,
            repository,
        })
    }

    /// Returns the repository this source reads from.
    #[must_use]
    pub fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    /// Drains every remaining page after `first`, sending `headers` on each.
    async fn collect_pages<T: DeserializeOwned>(
        &self,
        mut first: Page<T>,
        headers: &HeaderMap,
    ) -> Result<Vec<T>, SourceError> {
        let mut items = first.take_items();
        let mut next = first.next.take();

        while let Some(uri) = next {
            ensure_core_rate_limit(&self.octocrab).await?;
            let mut page: Page<T> = self
                .octocrab
                .get_with_headers(uri.to_string(), None::<&()>, Some(headers.clone()))
                .await?;
            items.extend(page.take_items());
            next = page.next.take();
        }

        Ok(items)
    }
}

impl IssueSource for GitHubSource {
    async fn issues(&self, state: IssueState) -> Result<Vec<Issue>, SourceError> {
        debug!(repo = %self.repository, state = %state, "Listing issues");
        ensure_core_rate_limit(&self.octocrab).await?;

        // The plain-text rendering of each body only comes with the full media type
        let headers = full_media_headers();
        let route = format!(
            "/repos/{}/{}/issues",
            self.repository.owner, self.repository.name
        );
        let query = IssueListParams::oldest_first(state);

        let first: Page<issues::Issue> = self
            .octocrab
            .get_with_headers(route, Some(&query), Some(headers.clone()))
            .await?;

        let issues = self.collect_pages(first, &headers).await?;
        info!(count = issues.len(), state = %state, "Fetched issues");
        Ok(issues.into_iter().map(Issue::from).collect())
    }

    async fn comments(&self, issue: &Issue) -> Result<Vec<Comment>, SourceError> {
        debug!(issue_number = issue.number, "Listing comments");
        ensure_core_rate_limit(&self.octocrab).await?;

        let first = self
            .octocrab
            .issues(&self.repository.owner, &self.repository.name)
            .list_comments(issue.number)
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        let comments: Vec<issues::Comment> = self.collect_pages(first, &HeaderMap::new()).await?;
        Ok(comments.into_iter().map(Comment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_listing_asks_for_full_media_type() {
        let headers = full_media_headers();

        assert_eq!(headers.get(ACCEPT).unwrap(), FULL_MEDIA_TYPE);
    }

    #[test]
    fn issue_listing_sorts_oldest_first() {
        let query = IssueListParams::oldest_first(IssueState::Closed);

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "state": "closed",
                "sort": "created",
                "direction": "asc",
                "per_page": 100,
            })
        );
    }
}
