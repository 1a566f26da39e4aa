#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod launchpad;
pub mod migration;
pub mod prompt;
pub mod rate_limit;
pub mod runner;
pub mod source;
pub mod summary;
pub mod templates;

pub use config::{ConfigError, Settings, TemplateSettings};
pub use launchpad::{
    Bug, BugTracker, CredentialStore, Distribution, LaunchpadClient, LaunchpadEnvironment,
    LaunchpadError, NewBug, OAuthToken,
};
pub use migration::{should_skip, MigrationError, MigrationOptions, Migrator};
pub use prompt::{prompt_for_credentials, prompt_for_input, GitHubCredentials};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use runner::{Runner, RunnerConfig, RunnerError, DEFAULT_CONSUMER_NAME};
pub use source::{
    Comment, GitHubSource, Issue, IssueSource, IssueState, RepositoryRef, SourceError,
};
pub use summary::{MigrationResult, RunSummary};
pub use templates::{
    create_handlebars_registry, generate_bug_title, DescriptionRenderer, TemplateError,
};
