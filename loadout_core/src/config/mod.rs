//! Configuration loading from TOML and JSON files

mod constants;

pub use constants::{
    default_constants, BaseTimings, Constants, ItemDefaults, Multipliers, SimulationConstants,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON file and deserialize it
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_json(&content)
}

/// Load a JSON string and deserialize it
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = serde_json::from_str(content)?;
    Ok(config)
}

/// Load a file as TOML or JSON depending on its extension
pub fn load_any<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => load_toml(path),
        Some("json") => load_json(path),
        other => Err(ConfigError::ValidationError(format!(
            "unsupported config extension {:?} for {}",
            other,
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_any_rejects_unknown_extension() {
        let err = load_any::<Constants>(Path::new("constants.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_toml::<Constants>(Path::new("/nonexistent/constants.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_bad_json_is_json_error() {
        let err = parse_json::<Constants>("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }
}
