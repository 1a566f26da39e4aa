//! Runner configuration.

use crate::config::Settings;
use crate::launchpad::LaunchpadEnvironment;
use crate::migration::MigrationOptions;
use crate::source::{IssueState, RepositoryRef};

/// Default OAuth consumer name presented to Launchpad.
pub const DEFAULT_CONSUMER_NAME: &str = "github-to-lp";

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Repository to read issues from.
    from_repository: RepositoryRef,
    /// Distribution to file bugs against.
    to_distribution: String,
    /// Which issues to migrate and how.
    options: MigrationOptions,
    /// Launchpad instance.
    environment: LaunchpadEnvironment,
    /// OAuth consumer name.
    consumer_name: String,
    /// User agent and templates.
    settings: Settings,
}

impl RunnerConfig {
    /// Creates a configuration with default options.
    pub fn new(from_repository: RepositoryRef, to_distribution: String) -> Self {
        Self {
            from_repository,
            to_distribution,
            options: MigrationOptions::default(),
            environment: LaunchpadEnvironment::default(),
            consumer_name: DEFAULT_CONSUMER_NAME.to_string(),
            settings: Settings::default(),
        }
    }

    /// Sets the issue state filter.
    pub fn with_state(mut self, state: IssueState) -> Self {
        self.options.state = state;
        self
    }

    /// Sets the skip threshold.
    pub fn with_skip_until(mut self, skip_until: Option<u64>) -> Self {
        self.options.skip_until = skip_until;
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.options.dry_run = dry_run;
        self
    }

    /// Sets the Launchpad instance.
    pub fn with_environment(mut self, environment: LaunchpadEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the OAuth consumer name.
    pub fn with_consumer_name(mut self, consumer_name: String) -> Self {
        self.consumer_name = consumer_name;
        self
    }

    /// Sets the user agent and templates.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the source repository.
    pub fn from_repository(&self) -> &RepositoryRef {
        &self.from_repository
    }

    /// Returns the target distribution name.
    pub fn to_distribution(&self) -> &str {
        &self.to_distribution
    }

    /// Returns the migration options.
    pub fn options(&self) -> MigrationOptions {
        self.options
    }

    /// Returns the Launchpad instance.
    pub fn environment(&self) -> LaunchpadEnvironment {
        self.environment
    }

    /// Returns the OAuth consumer name.
    pub fn consumer_name(&self) -> &str {
        &self.consumer_name
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
