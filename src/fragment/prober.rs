//! Fragment availability prober

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use thiserror::Error;

use super::validator::UsernameValidator;
use super::UsernameProbe;
use crate::error::{Result, UsernameForgeError};
use crate::types::{CheckResult, ProbeConfig};

const MSG_AVAILABLE: &str = "Username available";
const MSG_AUCTION: &str = "Username in auction";
const MSG_TAKEN: &str = "Username taken";

/// Per-username failure, folded into `CheckResult::Unknown` at the prober boundary
#[derive(Error, Debug)]
pub enum ProbeError {
    /// DNS, connect, timeout and other transport failures
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Classify a fetched page by its final URL and body text.
///
/// Any URL matching neither the search redirect nor the username page is
/// reported as taken.
pub fn classify(username: &str, final_url: &str, body: &str) -> CheckResult {
    if final_url.contains(&format!("query={}", username)) {
        return CheckResult::Available(MSG_AVAILABLE.to_string());
    }

    if final_url.contains(&format!("/username/{}", username)) {
        let body = body.to_lowercase();
        if body.contains("auction") || body.contains("bid") {
            return CheckResult::InAuction(MSG_AUCTION.to_string());
        }
        return CheckResult::Taken(MSG_TAKEN.to_string());
    }

    CheckResult::Taken(MSG_TAKEN.to_string())
}

/// Checks usernames against Fragment with one reusable client session
pub struct FragmentProber {
    client: Client,
    base_url: String,
    validator: UsernameValidator,
}

impl FragmentProber {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        let referer = HeaderValue::from_str(&format!("{}/", base_url))
            .map_err(|e| UsernameForgeError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        headers.insert(REFERER, referer);

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .cookie_store(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| UsernameForgeError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            validator: UsernameValidator::new()?,
        })
    }

    /// Page URL for a username, embedded verbatim
    pub fn username_url(&self, username: &str) -> String {
        format!("{}/username/{}", self.base_url, username)
    }

    /// One GET, following redirects; yields the final URL and body
    async fn fetch(&self, username: &str) -> std::result::Result<(String, String), ProbeError> {
        self.validator
            .validate(username)
            .map_err(|e| ProbeError::Unexpected(e.to_string()))?;

        let response = self.client.get(self.username_url(username)).send().await?;
        let final_url = response.url().to_string();
        let body = response.text().await?;

        Ok((final_url, body))
    }
}

#[async_trait]
impl UsernameProbe for FragmentProber {
    async fn check(&self, username: &str) -> CheckResult {
        let start_time = Instant::now();

        match self.fetch(username).await {
            Ok((final_url, body)) => {
                let result = classify(username, &final_url, &body);
                tracing::debug!(
                    username = %username,
                    final_url = %final_url,
                    status = %result.status(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Username check completed"
                );
                result
            }
            Err(e) => {
                tracing::debug!(username = %username, error = %e, "Username check failed");
                CheckResult::Unknown(e.to_string())
            }
        }
    }
}
