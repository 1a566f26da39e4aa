//! Optional settings file.
//!
//! Everything has a built-in default; the file only overrides the GitHub
//! user agent and the description templates.
//!
//! ```toml
//! user-agent = "my-migration/1.0"
//!
//! [templates]
//! description = "description.hbs"
//! comment = "comment.hbs"
//! separator = "\n----\n\n"
//! ```

mod error;

pub use error::ConfigError;

use crate::templates::{
    DescriptionRenderer, TemplateError, DEFAULT_COMMENT_TEMPLATE, DEFAULT_DESCRIPTION_TEMPLATE,
    DEFAULT_SEPARATOR,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// User agent sent to GitHub unless overridden.
pub fn default_user_agent() -> String {
    format!("github-issues-to-launchpad v{}", env!("CARGO_PKG_VERSION"))
}

/// Raw settings file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SettingsFile {
    user_agent: Option<String>,
    #[serde(default)]
    templates: TemplatePaths,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TemplatePaths {
    description: Option<PathBuf>,
    comment: Option<PathBuf>,
    separator: Option<String>,
}

/// Loaded description templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSettings {
    /// Handlebars template for the whole description.
    pub description: String,

    /// Handlebars template for one comment.
    pub comment: String,

    /// Text placed between comments.
    pub separator: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION_TEMPLATE.to_string(),
            comment: DEFAULT_COMMENT_TEMPLATE.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl TemplateSettings {
    /// Builds a renderer from these templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to compile.
    pub fn renderer(&self) -> Result<DescriptionRenderer, TemplateError> {
        DescriptionRenderer::with_templates(
            self.description.clone(),
            self.comment.clone(),
            self.separator.clone(),
        )
    }
}

/// Resolved settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// User agent sent to GitHub.
    pub user_agent: String,

    /// Description templates.
    pub templates: TemplateSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            templates: TemplateSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// Template paths are resolved relative to the settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file or a template is missing,
    /// unreadable, malformed or empty.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading settings");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = read_file(path)?;
        let file: SettingsFile = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let defaults = TemplateSettings::default();

        let user_agent = match file.user_agent {
            Some(agent) if agent.trim().is_empty() => {
                return Err(validation_error(path, "user-agent is empty"));
            }
            Some(agent) => agent,
            None => default_user_agent(),
        };

        let description = match file.templates.description {
            Some(relative) => load_template(&base_dir.join(relative))?,
            None => defaults.description,
        };
        let comment = match file.templates.comment {
            Some(relative) => load_template(&base_dir.join(relative))?,
            None => defaults.comment,
        };
        let separator = file.templates.separator.unwrap_or(defaults.separator);

        Ok(Self {
            user_agent,
            templates: TemplateSettings {
                description,
                comment,
                separator,
            },
        })
    }
}

fn load_template(path: &Path) -> Result<String, ConfigError> {
    debug!(path = %path.display(), "Loading template");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let template = read_file(path)?;
    if template.trim().is_empty() {
        return Err(validation_error(path, "template is empty"));
    }
    Ok(template)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}

fn validation_error(path: &Path, message: &str) -> ConfigError {
    ConfigError::ValidationError {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_built_in_layout() {
        let settings = Settings::default();

        assert!(settings.user_agent.starts_with("github-issues-to-launchpad v"));
        assert_eq!(settings.templates.description, DEFAULT_DESCRIPTION_TEMPLATE);
        assert_eq!(settings.templates.separator, DEFAULT_SEPARATOR);
    }

    #[test]
    fn loads_templates_relative_to_settings_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("templates")).unwrap();
        fs::write(
            temp.path().join("templates/description.hbs"),
            "{{title}}\n{{comments}}",
        )
        .unwrap();
        fs::write(
            temp.path().join("settings.toml"),
            r#"
user-agent = "acme-migration/2.0"

[templates]
description = "templates/description.hbs"
separator = "\n~~~\n"
"#,
        )
        .unwrap();

        let settings = Settings::load(&temp.path().join("settings.toml")).unwrap();

        assert_eq!(settings.user_agent, "acme-migration/2.0");
        assert_eq!(settings.templates.description, "{{title}}\n{{comments}}");
        assert_eq!(settings.templates.comment, DEFAULT_COMMENT_TEMPLATE);
        assert_eq!(settings.templates.separator, "\n~~~\n");
        assert!(settings.templates.renderer().is_ok());
    }

    #[test]
    fn empty_settings_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn missing_settings_file() {
        let temp = TempDir::new().unwrap();

        let result = Settings::load(&temp.path().join("nonexistent.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn missing_template_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "[templates]\ncomment = \"absent.hbs\"\n").unwrap();

        let result = Settings::load(&path);
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn rejects_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "user-agent = ").unwrap();

        let result = Settings::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "state = \"all\"\n").unwrap();

        let result = Settings::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_empty_template_and_user_agent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("blank.hbs"), "  \n").unwrap();

        let path = temp.path().join("settings.toml");
        fs::write(&path, "[templates]\ndescription = \"blank.hbs\"\n").unwrap();
        let result = Settings::load(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));

        fs::write(&path, "user-agent = \" \"\n").unwrap();
        let result = Settings::load(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }
}
