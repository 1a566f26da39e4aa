//! Launchpad instances.

use std::fmt;
use std::str::FromStr;

/// Web service API version used for every request.
pub const API_VERSION: &str = "1.0";

/// A Launchpad instance to migrate into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchpadEnvironment {
    /// launchpad.net
    #[default]
    Production,

    /// staging.launchpad.net, reset periodically.
    Staging,

    /// qastaging.launchpad.net
    QaStaging,
}

impl LaunchpadEnvironment {
    /// Returns the environment name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::QaStaging => "qastaging",
        }
    }

    /// Root of the website, where the OAuth endpoints live.
    #[must_use]
    pub fn web_root(&self) -> &'static str {
        match self {
            Self::Production => "https://launchpad.net",
            Self::Staging => "https://staging.launchpad.net",
            Self::QaStaging => "https://qastaging.launchpad.net",
        }
    }

    /// Root of the web service API.
    #[must_use]
    pub fn api_root(&self) -> &'static str {
        match self {
            Self::Production => "https://api.launchpad.net",
            Self::Staging => "https://api.staging.launchpad.net",
            Self::QaStaging => "https://api.qastaging.launchpad.net",
        }
    }

    /// Root of the bug tracker website.
    #[must_use]
    pub fn bugs_root(&self) -> &'static str {
        match self {
            Self::Production => "https://bugs.launchpad.net",
            Self::Staging => "https://bugs.staging.launchpad.net",
            Self::QaStaging => "https://bugs.qastaging.launchpad.net",
        }
    }

    /// Website URL of a bug.
    #[must_use]
    pub fn bug_web_url(&self, id: u64) -> String {
        format!("{}/bugs/{id}", self.bugs_root())
    }

    /// Builds a versioned API URL for a resource path.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_root(),
            API_VERSION,
            path.trim_start_matches('/')
        )
    }

    /// Builds a website URL for an OAuth endpoint such as `+request-token`.
    #[must_use]
    pub fn web_url(&self, path: &str) -> String {
        format!("{}/{}", self.web_root(), path.trim_start_matches('/'))
    }
}

impl FromStr for LaunchpadEnvironment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "qastaging" => Ok(Self::QaStaging),
            other => Err(format!(
                "unknown Launchpad environment '{other}', accepted values: production, staging, qastaging"
            )),
        }
    }
}

impl fmt::Display for LaunchpadEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
