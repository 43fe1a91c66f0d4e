//! Fragment username availability checking module

pub mod prober;
pub mod validator;

// Re-export main functionality
pub use prober::{classify, FragmentProber, ProbeError};
pub use validator::UsernameValidator;

use crate::types::CheckResult;
use async_trait::async_trait;

/// Trait for username checking methods
#[async_trait]
pub trait UsernameProbe: Send + Sync {
    /// Check one username; failures come back as `CheckResult::Unknown`
    async fn check(&self, username: &str) -> CheckResult;
}
