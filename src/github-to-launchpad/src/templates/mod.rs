//! Bug description rendering using Handlebars.
//!
//! An issue, its labels and its comments are folded into one plain-text
//! description. Nothing is escaped or truncated.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{
    create_handlebars_registry, format_timestamp, DescriptionRenderer,
    DEFAULT_COMMENT_TEMPLATE, DEFAULT_DESCRIPTION_TEMPLATE, DEFAULT_SEPARATOR,
};

use crate::source::Issue;

/// Generates the Launchpad bug title for an issue.
///
/// The GitHub title is carried over unchanged.
#[must_use]
pub fn generate_bug_title(issue: &Issue) -> String {
    issue.title.clone()
}
