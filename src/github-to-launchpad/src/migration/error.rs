//! Migration error types.

use crate::launchpad::LaunchpadError;
use crate::source::SourceError;
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that abort a migration run.
///
/// HTTP-level bug creation failures are not errors; they are reported per
/// issue and the run continues.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Reading issues or comments failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Rendering a description failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Launchpad could not be reached.
    #[error(transparent)]
    Launchpad(#[from] LaunchpadError),

    /// Writing to the operator failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
