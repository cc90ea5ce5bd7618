//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (ID width, thresholds, quality)
//! - Check the identifier budget leaves room for a payload
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FlareConfig → Result<(), Vec<ValidationError>>
//! - Runs before a scope is built from the config

use thiserror::Error;

use crate::config::schema::FlareConfig;

/// Narrowest route ID accepted.
pub const MIN_ID_WIDTH: usize = 4;
/// A 53-bit hash is at most 11 radix-36 digits; wider IDs would only pad.
pub const MAX_ID_WIDTH: usize = 11;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("routing.id_width must be between {} and {}, got {}", MIN_ID_WIDTH, MAX_ID_WIDTH, .0)]
    IdWidth(usize),

    #[error("routing.separator must not be empty")]
    EmptySeparator,

    #[error("codec.inline_threshold must be greater than zero")]
    ZeroThreshold,

    #[error("codec.identifier_budget ({budget}) must exceed routing.id_width ({id_width})")]
    BudgetTooSmall { budget: usize, id_width: usize },

    #[error("codec.compression_quality must be at most 11, got {0}")]
    Quality(u32),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &FlareConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let id_width = config.routing.id_width;
    if !(MIN_ID_WIDTH..=MAX_ID_WIDTH).contains(&id_width) {
        errors.push(ValidationError::IdWidth(id_width));
    }
    if config.routing.separator.is_empty() {
        errors.push(ValidationError::EmptySeparator);
    }
    if config.codec.inline_threshold == 0 {
        errors.push(ValidationError::ZeroThreshold);
    }
    if config.codec.identifier_budget <= id_width {
        errors.push(ValidationError::BudgetTooSmall {
            budget: config.codec.identifier_budget,
            id_width,
        });
    }
    if config.codec.compression_quality > 11 {
        errors.push(ValidationError::Quality(config.codec.compression_quality));
    }
    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&FlareConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = FlareConfig::default();
        config.routing.id_width = 2;
        config.routing.separator = String::new();
        config.codec.compression_quality = 12;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::IdWidth(2),
                ValidationError::EmptySeparator,
                ValidationError::Quality(12),
                ValidationError::LogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn test_budget_must_leave_room() {
        let mut config = FlareConfig::default();
        config.codec.identifier_budget = 10;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::BudgetTooSmall {
                budget: 10,
                id_width: 10
            }]
        );
    }
}
