//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a scope.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a scope.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FlareConfig {
    /// Route ID assignment and path building.
    pub routing: RoutingConfig,

    /// Payload encoding limits.
    pub codec: CodecConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl FlareConfig {
    /// Largest payload a generator may emit: the inline threshold, further
    /// capped so that route ID + payload stays within the identifier budget.
    pub fn payload_limit(&self) -> usize {
        self.codec
            .inline_threshold
            .min(self.codec.identifier_budget.saturating_sub(self.routing.id_width))
    }
}

/// Route ID and route path settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Width of the route ID prefix in characters.
    pub id_width: usize,

    /// Separator joining ancestor names into a route path.
    pub separator: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            id_width: 10,
            separator: "/".to_string(),
        }
    }
}

/// Payload codec settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Longest plain payload kept uncompressed, and the ceiling for the
    /// compressed form.
    pub inline_threshold: usize,

    /// Maximum length of a whole identifier (route ID + payload).
    /// 100 matches the component ID limit of common chat platforms.
    pub identifier_budget: usize,

    /// Brotli quality, 0 (fast) to 11 (smallest).
    pub compression_quality: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            inline_threshold: 100,
            identifier_budget: 100,
            compression_quality: 11,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
