//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Scope build and dispatch produce:
//!     → tracing events (route registration, unlock failures, suppression)
//!     → metrics.rs (route count, dispatch outcomes, dispatch latency)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, filtered by RUST_LOG or config)
//!     → whatever `metrics` recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing a subscriber or recorder is the
//!   host's call (the CLI and demo do it through `init_logging`)
//! - Without a recorder, metric updates are no-ops

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
