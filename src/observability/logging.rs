//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries built on this crate
//! - Honor `RUST_LOG` first, the configured level second
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Initialization is idempotent: a second call is ignored, which keeps
//!   tests and embedding hosts from panicking on a global subscriber

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a formatted stdout subscriber.
///
/// `default_level` applies to this crate when `RUST_LOG` is unset.
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("flare_scope={default_level}").into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
