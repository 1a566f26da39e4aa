//! Launchpad web service client.
//!
//! Launchpad has no Rust client library, so this module speaks the REST API
//! directly: OAuth PLAINTEXT signing, distribution lookup and the
//! `createBug` operation.

pub mod auth;
mod credentials;
mod environment;
mod error;
mod models;

pub use auth::OAuthToken;
pub use credentials::CredentialStore;
pub use environment::{LaunchpadEnvironment, API_VERSION};
pub use error::LaunchpadError;
pub use models::{Bug, Distribution, NewBug, Person};

use reqwest::header::{ACCEPT, AUTHORIZATION, LOCATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, info_span, warn, Instrument};

/// Request timeout for Launchpad calls.
const TIMEOUT_SECS: u64 = 30;

/// Target tracker that accepts new bugs.
#[allow(async_fn_in_trait)]
pub trait BugTracker {
    /// Files a new bug and returns it.
    async fn create_bug(&self, bug: &NewBug<'_>) -> Result<Bug, LaunchpadError>;
}

/// Authenticated Launchpad API client.
#[derive(Debug, Clone)]
pub struct LaunchpadClient {
    http: Client,
    environment: LaunchpadEnvironment,
    consumer_key: String,
    token: OAuthToken,
}

impl LaunchpadClient {
    /// Logs in, reusing a cached access token when the keychain has one.
    ///
    /// Without a usable cached token the desktop authorization flow runs and
    /// the new token is cached. Keychain problems are logged, never fatal.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError`] if authorization or verification fails.
    pub async fn login(
        environment: LaunchpadEnvironment,
        consumer_key: &str,
    ) -> Result<Self, LaunchpadError> {
        let span = info_span!("launchpad_login", environment = %environment, consumer_key);

        async {
            let http = build_http_client()?;
            let store = CredentialStore::new(consumer_key, environment);

            let cached = store.load().unwrap_or_else(|e| {
                warn!(error = %e, "Could not read cached Launchpad token");
                None
            });

            if let Some(token) = cached {
                let client = Self::with_token(http.clone(), environment, consumer_key, token);
                match client.me().await {
                    Ok(person) => {
                        info!(user = %person.name, "Logged in to Launchpad with cached token");
                        return Ok(client);
                    }
                    Err(e) if e.is_unauthorized() => {
                        warn!("Cached Launchpad token was rejected, authorizing again");
                        if let Err(e) = store.delete() {
                            warn!(error = %e, "Could not remove rejected token");
                        }
                    }
                    Err(e) => return Err(e),
                }
            }

            let token = auth::authorize(&http, environment, consumer_key).await?;
            if let Err(e) = store.store(&token) {
                warn!(error = %e, "Could not cache Launchpad token");
            }

            let client = Self::with_token(http, environment, consumer_key, token);
            let person = client.me().await?;
            info!(user = %person.name, "Logged in to Launchpad");
            Ok(client)
        }
        .instrument(span)
        .await
    }

    /// Creates a client from an existing access token.
    #[must_use]
    pub fn with_token(
        http: Client,
        environment: LaunchpadEnvironment,
        consumer_key: &str,
        token: OAuthToken,
    ) -> Self {
        Self {
            http,
            environment,
            consumer_key: consumer_key.to_string(),
            token,
        }
    }

    /// Returns the environment this client talks to.
    #[must_use]
    pub fn environment(&self) -> LaunchpadEnvironment {
        self.environment
    }

    /// Fetches the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError`] if the token is rejected.
    pub async fn me(&self) -> Result<Person, LaunchpadError> {
        self.get_json(&self.environment.api_url("people/+me"), "people/+me")
            .await
    }

    /// Resolves a distribution by name.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchpadError::Http`] if the name does not exist and
    /// [`LaunchpadError::NotADistribution`] if it names another kind of
    /// resource, such as a project.
    pub async fn distribution(&self, name: &str) -> Result<Distribution, LaunchpadError> {
        let endpoint = urlencoding::encode(name.trim()).into_owned();
        let distribution: Distribution = self
            .get_json(&self.environment.api_url(&endpoint), &endpoint)
            .await?;

        if !distribution.is_distribution() {
            return Err(LaunchpadError::NotADistribution {
                name: name.to_string(),
            });
        }

        info!(
            distribution = %distribution.name,
            display_name = %distribution.display_name,
            "Resolved Launchpad distribution"
        );
        Ok(distribution)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, auth::sign(&self.consumer_key, &self.token))
            .header(ACCEPT, "application/json")
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        endpoint: &str,
    ) -> Result<T, LaunchpadError> {
        debug!(url, "GET");
        let response = self.authorized(self.http.get(url)).send().await?;
        handle_response(response, endpoint).await
    }
}

impl BugTracker for LaunchpadClient {
    async fn create_bug(&self, bug: &NewBug<'_>) -> Result<Bug, LaunchpadError> {
        let endpoint = "bugs";
        debug!(title = bug.title, target = %bug.target.name, "Creating bug");

        let response = self
            .authorized(self.http.post(self.environment.api_url(endpoint)))
            .form(&bug.form())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(http_error(response, endpoint).await);
        }

        // createBug answers 201 with the new bug's location. The bug exists from
        // here on, so nothing below may surface as an HTTP failure.
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match location {
            Some(url) => bug_from_location(&url, bug.title, self.environment),
            None => response
                .json::<Bug>()
                .await
                .map_err(|e| LaunchpadError::UnexpectedResponse {
                    endpoint: endpoint.to_string(),
                    message: e.to_string(),
                }),
        }
    }
}

/// Builds the created bug from the `Location` of a `createBug` response.
fn bug_from_location(
    location: &str,
    title: &str,
    environment: LaunchpadEnvironment,
) -> Result<Bug, LaunchpadError> {
    let id = location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<u64>().ok())
        .ok_or_else(|| LaunchpadError::UnexpectedResponse {
            endpoint: "bugs".to_string(),
            message: format!("bug was created but its location '{location}' has no bug number"),
        })?;

    Ok(Bug {
        id,
        title: title.to_string(),
        web_link: environment.bug_web_url(id),
    })
}

fn build_http_client() -> Result<Client, LaunchpadError> {
    Ok(Client::builder()
        .user_agent(concat!("github-to-launchpad/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()?)
}

async fn handle_response<T: DeserializeOwned>(
    response: Response,
    endpoint: &str,
) -> Result<T, LaunchpadError> {
    if !response.status().is_success() {
        return Err(http_error(response, endpoint).await);
    }

    response
        .json::<T>()
        .await
        .map_err(|e| LaunchpadError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
}

async fn http_error(response: Response, endpoint: &str) -> LaunchpadError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("no reason given").to_string(),
        text => text.to_string(),
    };

    LaunchpadError::Http {
        status: status.as_u16(),
        endpoint: endpoint.to_string(),
        message,
    }
}
