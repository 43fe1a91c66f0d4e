//! Username Forge - short username enumeration and availability checking
//!
//! Walks every short alphanumeric username in order and asks Fragment whether
//! each one can still be claimed.

pub mod error;
pub mod fragment;
pub mod snipe;
pub mod types;

// Re-export commonly used types
pub use error::{Result, UsernameForgeError};
pub use types::{
    AppConfig, AvailabilityStatus, CheckResult, ProbeConfig, RunConfig, RunSummary,
};

// Re-export main functionality
pub use fragment::{FragmentProber, UsernameProbe};
pub use snipe::{
    watch_interrupts, BatchRunner, Charset, StopSignal, TokioPacer, UsernameGenerator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default filter
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("username_forge=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
