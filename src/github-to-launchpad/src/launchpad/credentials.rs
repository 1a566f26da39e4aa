//! Launchpad token storage using the OS keychain.
//!
//! Access tokens are cached per consumer name and environment so later
//! runs skip the browser authorization step.

use super::auth::OAuthToken;
use super::{LaunchpadEnvironment, LaunchpadError};
use keyring::Entry;

/// Keychain entry holding the access token for one consumer and environment.
pub struct CredentialStore {
    service: String,
    account: String,
}

impl CredentialStore {
    /// Creates a store for the given consumer name and environment.
    #[must_use]
    pub fn new(consumer_key: &str, environment: LaunchpadEnvironment) -> Self {
        Self {
            service: consumer_key.to_string(),
            account: account_name(environment),
        }
    }

    /// Loads the cached access token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the keychain is unavailable or the stored value is corrupt.
    pub fn load(&self) -> Result<Option<OAuthToken>, LaunchpadError> {
        let entry = self.entry()?;

        let stored = match entry.get_password() {
            Ok(stored) => stored,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(e) => {
                return Err(credential_error(format!("Failed to retrieve token: {e}")));
            }
        };

        serde_json::from_str(&stored)
            .map(Some)
            .map_err(|e| credential_error(format!("Stored token is corrupt: {e}")))
    }

    /// Caches an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the keychain rejects the write.
    pub fn store(&self, token: &OAuthToken) -> Result<(), LaunchpadError> {
        let entry = self.entry()?;
        let serialized = serde_json::to_string(token)
            .map_err(|e| credential_error(format!("Failed to serialize token: {e}")))?;

        entry
            .set_password(&serialized)
            .map_err(|e| credential_error(format!("Failed to store token: {e}")))
    }

    /// Removes the cached token.
    ///
    /// Deleting a token that does not exist is not an error.
    pub fn delete(&self) -> Result<(), LaunchpadError> {
        let entry = self.entry()?;

        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(credential_error(format!("Failed to delete token: {e}"))),
        }
    }

    fn entry(&self) -> Result<Entry, LaunchpadError> {
        Entry::new(&self.service, &self.account)
            .map_err(|e| credential_error(format!("Failed to create keyring entry: {e}")))
    }
}

fn account_name(environment: LaunchpadEnvironment) -> String {
    format!("launchpad-{}", environment.as_str())
}

fn credential_error(message: String) -> LaunchpadError {
    LaunchpadError::CredentialStorage { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounts_are_scoped_per_environment() {
        assert_eq!(
            account_name(LaunchpadEnvironment::Production),
            "launchpad-production"
        );
        assert_eq!(
            account_name(LaunchpadEnvironment::QaStaging),
            "launchpad-qastaging"
        );
    }

    #[test]
    fn store_is_keyed_by_consumer() {
        let store = CredentialStore::new("github-to-lp", LaunchpadEnvironment::Staging);

        assert_eq!(store.service, "github-to-lp");
        assert_eq!(store.account, "launchpad-staging");
    }

    // Keychain round trips need a real credential service and are left to
    // manual testing.
}
