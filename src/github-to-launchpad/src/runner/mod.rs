//! Session setup and the migration run.
//!
//! Setup is strictly linear: log in to GitHub, log in to Launchpad, resolve
//! the distribution, resolve the repository. Any failure ends the run.

mod config;
mod error;

pub use config::{RunnerConfig, DEFAULT_CONSUMER_NAME};
pub use error::RunnerError;

use crate::launchpad::{Distribution, LaunchpadClient};
use crate::migration::Migrator;
use crate::prompt::GitHubCredentials;
use crate::source::GitHubSource;
use crate::summary::RunSummary;
use crate::templates::DescriptionRenderer;
use octocrab::Octocrab;
use reqwest::header::USER_AGENT;
use std::io::Write;
use tracing::info;

/// Authenticated, resolved session ready to migrate.
pub struct Runner {
    config: RunnerConfig,
    source: GitHubSource,
    launchpad: LaunchpadClient,
    distribution: Distribution,
    renderer: DescriptionRenderer,
}

impl Runner {
    /// Authenticates against both trackers and resolves the handles.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if templates are invalid, either login fails,
    /// or the repository or distribution cannot be resolved.
    pub async fn connect(
        config: RunnerConfig,
        credentials: GitHubCredentials,
    ) -> Result<Self, RunnerError> {
        let renderer = config.settings().templates.renderer()?;

        let octocrab = login_to_github(credentials, &config.settings().user_agent).await?;
        let launchpad =
            LaunchpadClient::login(config.environment(), config.consumer_name()).await?;

        let distribution = launchpad.distribution(config.to_distribution()).await?;
        let source = GitHubSource::resolve(octocrab, config.from_repository().clone()).await?;

        Ok(Self {
            config,
            source,
            launchpad,
            distribution,
            renderer,
        })
    }

    /// Migrates the issues, writing one line per issue to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Migration`] if the run had to stop early.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<RunSummary, RunnerError> {
        info!(
            repo = %self.source.repository(),
            distribution = %self.distribution.name,
            environment = %self.launchpad.environment(),
            dry_run = self.config.options().dry_run,
            "Starting migration"
        );

        let migrator = Migrator::new(
            &self.source,
            &self.launchpad,
            &self.distribution,
            &self.renderer,
            self.config.options(),
        );
        Ok(migrator.migrate(out).await?)
    }
}

async fn login_to_github(
    credentials: GitHubCredentials,
    user_agent: &str,
) -> Result<Octocrab, RunnerError> {
    let octocrab = Octocrab::builder()
        .basic_auth(credentials.username, credentials.password)
        .add_header(USER_AGENT, user_agent.to_string())
        .build()?;

    let user = octocrab.current().user().await?;
    info!(user = %user.login, "Logged in to GitHub");
    Ok(octocrab)
}
