//! Rate limiting utilities for the GitHub API.
//!
//! Listing issues and comments of a large repository can burn through the
//! core quota, so every list request checks the remaining budget first and
//! sleeps until the window resets when it runs low.

use octocrab::Octocrab;
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit information for the core API.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds to sleep before the next request, if any.
    ///
    /// `now` is a Unix timestamp. The result is capped at one hour.
    #[must_use]
    pub fn wait_secs(&self, now: u64) -> Option<u64> {
        if self.remaining >= MIN_REMAINING_THRESHOLD || self.reset <= now {
            return None;
        }
        Some((self.reset - now).min(MAX_WAIT_SECS))
    }
}

/// Checks the current rate limit status for the core API (issues, comments).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Waits if the rate limit is low, returning true if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait_secs) = info.wait_secs(now) else {
        return false;
    };

    if info.reset - now > MAX_WAIT_SECS {
        warn!(
            reset = info.reset,
            max_wait = MAX_WAIT_SECS,
            "Rate limit reset too far in future, capping wait time"
        );
    }

    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs,
        "Rate limit low, waiting for reset"
    );

    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
    true
}

/// Ensures sufficient rate limit before making core API calls.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}
