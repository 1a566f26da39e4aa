//! Runner error types.

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Settings file errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Custom templates failed to compile.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// GitHub client initialization or login errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Repository resolution errors.
    #[error(transparent)]
    Source(#[from] crate::source::SourceError),

    /// Launchpad login or distribution resolution errors.
    #[error(transparent)]
    Launchpad(#[from] crate::launchpad::LaunchpadError),

    /// Errors that aborted the migration loop.
    #[error(transparent)]
    Migration(#[from] crate::migration::MigrationError),

    /// Reading credentials from the terminal failed.
    #[error("Failed to read credentials: {0}")]
    Prompt(#[from] std::io::Error),
}
