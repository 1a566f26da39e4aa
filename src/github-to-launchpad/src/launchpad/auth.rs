//! OAuth 1.0 PLAINTEXT desktop flow used by Launchpad.
//!
//! 1. POST `+request-token` with the consumer key.
//! 2. The operator opens `+authorize-token` and grants access.
//! 3. POST `+access-token` to exchange the reviewed request token.

use super::{LaunchpadEnvironment, LaunchpadError};
use crate::prompt::wait_for_enter;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use urlencoding::encode;

/// Realm Launchpad expects in the `Authorization` header.
const REALM: &str = "https://api.launchpad.net/";

/// Permission requested for the access token; enough to file public bugs.
const REQUESTED_PERMISSION: &str = "WRITE_PUBLIC";

/// An OAuth token and its secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    /// Token key.
    pub token: String,

    /// Token secret.
    pub secret: String,
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthToken")
            .field("token", &self.token)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Builds the `Authorization` header value for a signed request.
#[must_use]
pub fn authorization_header(
    consumer_key: &str,
    token: &OAuthToken,
    timestamp: i64,
    nonce: &str,
) -> String {
    format!(
        "OAuth realm=\"{}\", oauth_consumer_key=\"{}\", oauth_token=\"{}\", \
         oauth_signature_method=\"PLAINTEXT\", oauth_signature=\"{}\", \
         oauth_timestamp=\"{}\", oauth_nonce=\"{}\", oauth_version=\"1.0\"",
        REALM,
        encode(consumer_key),
        encode(&token.token),
        encode(&plaintext_signature(&token.secret)),
        timestamp,
        encode(nonce),
    )
}

/// Signs a fresh request with the current time and a random nonce.
#[must_use]
pub fn sign(consumer_key: &str, token: &OAuthToken) -> String {
    let nonce = rand::thread_rng().gen::<u64>().to_string();
    authorization_header(consumer_key, token, chrono::Utc::now().timestamp(), &nonce)
}

/// PLAINTEXT signature: empty consumer secret, `&`, token secret.
fn plaintext_signature(token_secret: &str) -> String {
    format!("&{token_secret}")
}

/// Returns the page the operator opens to grant access.
#[must_use]
pub fn authorize_url(environment: LaunchpadEnvironment, request_token: &OAuthToken) -> String {
    format!(
        "{}?oauth_token={}&allow_permission={}",
        environment.web_url("+authorize-token"),
        encode(&request_token.token),
        REQUESTED_PERMISSION
    )
}

/// Parses a form-encoded `oauth_token=..&oauth_token_secret=..` body.
///
/// # Errors
///
/// Returns [`LaunchpadError::UnexpectedResponse`] if either field is missing.
pub fn parse_token_response(endpoint: &str, body: &str) -> Result<OAuthToken, LaunchpadError> {
    let mut token = None;
    let mut secret = None;

    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        match key.as_ref() {
            "oauth_token" => token = Some(value.into_owned()),
            "oauth_token_secret" => secret = Some(value.into_owned()),
            _ => {}
        }
    }

    match (token, secret) {
        (Some(token), Some(secret)) => Ok(OAuthToken { token, secret }),
        _ => Err(LaunchpadError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            message: "missing oauth_token or oauth_token_secret".to_string(),
        }),
    }
}

/// Runs the full desktop flow and returns an access token.
///
/// # Errors
///
/// Returns [`LaunchpadError`] if a token request fails or the operator
/// declines access.
pub async fn authorize(
    http: &Client,
    environment: LaunchpadEnvironment,
    consumer_key: &str,
) -> Result<OAuthToken, LaunchpadError> {
    let request_token = fetch_request_token(http, environment, consumer_key).await?;

    println!(
        "\nAuthorize {consumer_key} to access Launchpad ({environment}) by opening:\n\n    {}\n",
        authorize_url(environment, &request_token)
    );
    println!("Press Enter once access has been granted.");

    loop {
        wait_for_enter()?;
        match exchange_request_token(http, environment, consumer_key, &request_token).await {
            Ok(access_token) => {
                info!(environment = %environment, "Launchpad access granted");
                return Ok(access_token);
            }
            Err(e) if e.is_unauthorized() => {
                println!("Access has not been granted yet. Press Enter to check again.");
            }
            Err(e) => return Err(e),
        }
    }
}

async fn fetch_request_token(
    http: &Client,
    environment: LaunchpadEnvironment,
    consumer_key: &str,
) -> Result<OAuthToken, LaunchpadError> {
    let endpoint = "+request-token";
    debug!(environment = %environment, "Requesting OAuth request token");

    let signature = plaintext_signature("");
    let form = [
        ("oauth_consumer_key", consumer_key),
        ("oauth_signature_method", "PLAINTEXT"),
        ("oauth_signature", signature.as_str()),
    ];

    post_token_form(http, environment, endpoint, &form).await
}

async fn exchange_request_token(
    http: &Client,
    environment: LaunchpadEnvironment,
    consumer_key: &str,
    request_token: &OAuthToken,
) -> Result<OAuthToken, LaunchpadError> {
    let endpoint = "+access-token";
    debug!(environment = %environment, "Exchanging request token");

    let signature = plaintext_signature(&request_token.secret);
    let form = [
        ("oauth_token", request_token.token.as_str()),
        ("oauth_consumer_key", consumer_key),
        ("oauth_signature_method", "PLAINTEXT"),
        ("oauth_signature", signature.as_str()),
    ];

    post_token_form(http, environment, endpoint, &form).await
}

async fn post_token_form(
    http: &Client,
    environment: LaunchpadEnvironment,
    endpoint: &str,
    form: &[(&str, &str)],
) -> Result<OAuthToken, LaunchpadError> {
    let response = http
        .post(environment.web_url(endpoint))
        .form(form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(LaunchpadError::Http {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
            message: body.trim().to_string(),
        });
    }

    parse_token_response(endpoint, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> OAuthToken {
        OAuthToken {
            token: "tok3n".to_string(),
            secret: "s3cret".to_string(),
        }
    }

    #[test]
    fn builds_plaintext_authorization_header() {
        let header = authorization_header("github-to-lp", &token(), 1_400_000_000, "12345");

        assert_eq!(
            header,
            "OAuth realm=\"https://api.launchpad.net/\", oauth_consumer_key=\"github-to-lp\", \
             oauth_token=\"tok3n\", oauth_signature_method=\"PLAINTEXT\", \
             oauth_signature=\"%26s3cret\", oauth_timestamp=\"1400000000\", \
             oauth_nonce=\"12345\", oauth_version=\"1.0\""
        );
    }

    #[test]
    fn signed_headers_use_fresh_nonces() {
        let first = sign("github-to-lp", &token());
        let second = sign("github-to-lp", &token());

        assert!(first.starts_with("OAuth realm="));
        assert_ne!(first, second);
    }

    #[test]
    fn authorize_url_requests_write_permission() {
        let url = authorize_url(LaunchpadEnvironment::Staging, &token());

        assert_eq!(
            url,
            "https://staging.launchpad.net/+authorize-token?oauth_token=tok3n&allow_permission=WRITE_PUBLIC"
        );
    }

    #[test]
    fn parses_token_response() {
        let parsed =
            parse_token_response("+access-token", "oauth_token=abc&oauth_token_secret=d%2Fef\n")
                .unwrap();

        assert_eq!(parsed.token, "abc");
        assert_eq!(parsed.secret, "d/ef");
    }

    #[test]
    fn rejects_incomplete_token_response() {
        let result = parse_token_response("+request-token", "oauth_token=abc");

        assert!(matches!(
            result,
            Err(LaunchpadError::UnexpectedResponse { .. })
        ));
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", token());

        assert!(rendered.contains("tok3n"));
        assert!(!rendered.contains("s3cret"));
    }
}
