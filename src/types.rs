//! Core types and structures for username-forge

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::error::{Result, UsernameForgeError};
use crate::snipe::Charset;

/// Default Fragment host
pub const DEFAULT_BASE_URL: &str = "https://fragment.com";

/// Browser identity sent with every availability request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Username availability status as counted in the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Available,
    Taken,
    Unknown,
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
            AvailabilityStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of checking one username
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Available(String),
    Taken(String),
    /// Taken, but listed for bidding
    InAuction(String),
    /// Transport or unexpected failure, carrying the error text
    Unknown(String),
}

impl CheckResult {
    pub fn message(&self) -> &str {
        match self {
            CheckResult::Available(m)
            | CheckResult::Taken(m)
            | CheckResult::InAuction(m)
            | CheckResult::Unknown(m) => m,
        }
    }

    /// Summary bucket; auctions count as taken
    pub fn status(&self) -> AvailabilityStatus {
        match self {
            CheckResult::Available(_) => AvailabilityStatus::Available,
            CheckResult::Taken(_) | CheckResult::InAuction(_) => AvailabilityStatus::Taken,
            CheckResult::Unknown(_) => AvailabilityStatus::Unknown,
        }
    }

    /// Console tag printed in front of each checked username
    pub fn tag(&self) -> &'static str {
        match self.status() {
            AvailabilityStatus::Available => "AVAILABLE",
            AvailabilityStatus::Taken => "TAKEN",
            AvailabilityStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Counters accumulated over one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: u64,
    pub available: u64,
    pub taken: u64,
    pub unknown: u64,
    pub interrupted: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            checked: 0,
            available: 0,
            taken: 0,
            unknown: 0,
            interrupted: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Count one checked username
    pub fn record(&mut self, result: &CheckResult) {
        self.checked += 1;
        match result.status() {
            AvailabilityStatus::Available => self.available += 1,
            AvailabilityStatus::Taken => self.taken += 1,
            AvailabilityStatus::Unknown => self.unknown += 1,
        }
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the availability prober
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Scheme and host, without trailing slash
    pub base_url: String,
    pub user_agent: String,
    /// `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Configuration for one batch run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Maximum usernames checked before stopping
    pub max_usernames: u64,
    /// Fixed pause after every check
    pub delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_usernames: 10,
            delay: Duration::from_millis(500),
        }
    }
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub length: usize,
    pub charset: Charset,
    pub probe: ProbeConfig,
    pub run: RunConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            length: 5,
            charset: Charset::Alphanumeric,
            probe: ProbeConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build configuration from `USERNAME_FORGE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("USERNAME_FORGE_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/').to_string();
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(crate::config_error!(
                    "USERNAME_FORGE_BASE_URL must start with http:// or https://, got '{}'",
                    base_url
                ));
            }
            config.probe.base_url = base_url;
        }

        if let Some(value) = lookup("USERNAME_FORGE_MAX_USERNAMES") {
            config.run.max_usernames = parse_number("USERNAME_FORGE_MAX_USERNAMES", &value)?;
        }

        if let Some(value) = lookup("USERNAME_FORGE_DELAY_MS") {
            let millis = parse_number("USERNAME_FORGE_DELAY_MS", &value)?;
            config.run.delay = Duration::from_millis(millis);
        }

        if let Some(value) = lookup("USERNAME_FORGE_CHARSET") {
            config.charset = Charset::from_name(&value).ok_or_else(|| {
                crate::config_error!(
                    "USERNAME_FORGE_CHARSET must be 'letters' or 'alphanumeric', got '{}'",
                    value
                )
            })?;
        }

        if let Some(value) = lookup("USERNAME_FORGE_LENGTH") {
            let length = parse_number("USERNAME_FORGE_LENGTH", &value)?;
            let length = usize::try_from(length).unwrap_or(usize::MAX);
            if length == 0 || config.charset.total_combinations(length).is_none() {
                return Err(UsernameForgeError::config(format!(
                    "USERNAME_FORGE_LENGTH {} is out of range for the {:?} charset",
                    value.trim(),
                    config.charset
                )));
            }
            config.length = length;
        }

        if let Some(value) = lookup("USERNAME_FORGE_TIMEOUT_SECS") {
            let secs = parse_number("USERNAME_FORGE_TIMEOUT_SECS", &value)?;
            if secs == 0 {
                return Err(UsernameForgeError::config("USERNAME_FORGE_TIMEOUT_SECS must be positive"));
            }
            config.probe.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|e| {
        UsernameForgeError::config(format!("{} must be a non-negative integer, got '{}': {}", key, value, e))
    })
}
