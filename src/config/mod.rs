//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), or FlareConfig::default()
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FlareConfig (validated, immutable)
//!     → handed to Flare::with_config, baked into the scope
//! ```
//!
//! # Design Decisions
//! - Config is fixed per scope; identifiers issued under one config are
//!   only dispatchable by a scope built with the same routing settings
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::CodecConfig;
pub use schema::FlareConfig;
pub use schema::ObservabilityConfig;
pub use schema::RoutingConfig;
