//! Description renderer.

use super::TemplateError;
use crate::source::{Comment, Issue};
use chrono::{DateTime, Utc};
use handlebars::{no_escape, Handlebars, Template};
use serde_json::{json, Value};

/// Layout of a migrated bug description.
pub const DEFAULT_DESCRIPTION_TEMPLATE: &str = "Opened by {{username}} on {{date}} at {{github_url}}

------------------------------------------------------------

{{issue_body}}

Tags: {{issue_tags}}

====================== COMMENTS ============================

{{comments}}
";

/// Layout of a single comment inside the description.
pub const DEFAULT_COMMENT_TEMPLATE: &str = "Comment created by {{username}} on {{date}}

{{comment_body}}
";

/// Placed between consecutive comments.
pub const DEFAULT_SEPARATOR: &str = "
------------------------------------------------------------

";

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (bug descriptions are plain text)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Launchpad receives the raw text as-is
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS+00:00`.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%:z").to_string()
}

/// Renders issues into Launchpad bug descriptions.
pub struct DescriptionRenderer {
    handlebars: Handlebars<'static>,
    description_template: String,
    comment_template: String,
    separator: String,
}

impl Default for DescriptionRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionRenderer {
    /// Creates a renderer using the built-in layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
            description_template: DEFAULT_DESCRIPTION_TEMPLATE.to_string(),
            comment_template: DEFAULT_COMMENT_TEMPLATE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Creates a renderer with custom templates.
    ///
    /// # Errors
    ///
    /// Returns an error if either template fails to compile.
    pub fn with_templates(
        description_template: String,
        comment_template: String,
        separator: String,
    ) -> Result<Self, TemplateError> {
        Template::compile(&description_template)?;
        Template::compile(&comment_template)?;

        Ok(Self {
            handlebars: create_handlebars_registry(),
            description_template,
            comment_template,
            separator,
        })
    }

    /// Renders the full bug description for an issue and its comments.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_description(&self, issue: &Issue) -> Result<String, TemplateError> {
        let data = json!({
            "username": issue.author,
            "date": format_timestamp(&issue.created_at),
            "github_url": issue.html_url,
            "issue_body": issue.body,
            "issue_tags": issue.labels.join(", "),
            "comments": self.render_comments(&issue.comments)?,
            "title": issue.title,
            "number": issue.number
        });

        self.render_template(&self.description_template, &data)
    }

    /// Renders the comments section. Empty when there are no comments.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_comments(&self, comments: &[Comment]) -> Result<String, TemplateError> {
        let blocks = comments
            .iter()
            .map(|comment| self.render_comment(comment))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(blocks.join(&self.separator))
    }

    fn render_comment(&self, comment: &Comment) -> Result<String, TemplateError> {
        let data = json!({
            "username": comment.author,
            "date": format_timestamp(&comment.created_at),
            "comment_body": comment.body
        });

        self.render_template(&self.comment_template, &data)
    }

    fn render_template(&self, template: &str, data: &Value) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
