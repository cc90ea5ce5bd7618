//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::FlareConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<FlareConfig, ConfigError> {
    let config: FlareConfig = toml::from_str(content).map_err(ConfigError::Parse)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FlareConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
            [routing]
            id_width = 8
            separator = "."

            [codec]
            inline_threshold = 80
            identifier_budget = 100
            compression_quality = 9

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.routing.id_width, 8);
        assert_eq!(config.routing.separator, ".");
        assert_eq!(config.payload_limit(), 80);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = parse_config("[routing]\nid_width = 40\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("Validation failed"));

        let err = parse_config("[routing\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("flare_scope_loader_test.toml");
        fs::write(&path, "[codec]\ncompression_quality = 5\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.codec.compression_quality, 5);

        // Cleanup
        fs::remove_file(&path).unwrap_or_default();

        assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
    }
}
