//! Launchpad error types.

use thiserror::Error;

/// Errors that can occur while talking to Launchpad.
#[derive(Debug, Error)]
pub enum LaunchpadError {
    /// The request never produced a response (connection, TLS, timeout).
    #[error("Launchpad request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Launchpad answered with a non-success status.
    #[error("Launchpad API error ({status}) on {endpoint}: {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// A success response did not have the expected shape.
    #[error("Unexpected Launchpad response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },

    /// The named resource exists but is not a distribution.
    #[error("'{name}' is not a Launchpad distribution")]
    NotADistribution { name: String },

    /// OS keychain operation failed.
    #[error("Credential storage error: {message}")]
    CredentialStorage { message: String },

    /// Reading the operator's confirmation failed.
    #[error("Failed to read authorization confirmation: {0}")]
    Io(#[from] std::io::Error),
}

impl LaunchpadError {
    /// Returns the HTTP status for errors Launchpad answered with.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error is an HTTP-layer failure.
    #[must_use]
    pub fn is_http_failure(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Returns true if Launchpad rejected the credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_http_failures() {
        let error = LaunchpadError::Http {
            status: 401,
            endpoint: "people/+me".to_string(),
            message: "Unknown access token".to_string(),
        };

        assert!(error.is_http_failure());
        assert!(error.is_unauthorized());
        assert_eq!(error.status(), Some(401));

        let error = LaunchpadError::NotADistribution {
            name: "bzr".to_string(),
        };
        assert!(!error.is_http_failure());
        assert_eq!(error.status(), None);
    }
}
