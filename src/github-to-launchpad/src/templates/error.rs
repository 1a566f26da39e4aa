//! Template rendering error types.

/// Template rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Handlebars rendering error.
    #[error("Template rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template compilation error.
    #[error("Template compilation error: {0}")]
    CompileError(#[from] handlebars::TemplateError),
}
