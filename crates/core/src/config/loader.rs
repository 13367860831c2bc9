//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use crate::validation::{validate_config_sections, ValidationResult, Validator};
use std::path::Path;

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when none exists.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(explicit) = path {
            if !Path::new(explicit).exists() {
                return Err(Error::config_not_found(explicit));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate().to_result().map_err(|e| {
            Error::new(ErrorCode::InvalidConfigValue, e.message)
                .with_context(config.path.clone().unwrap_or_else(|| "defaults".to_string()))
        })?;

        tracing::debug!(path = ?config.path, "Configuration loaded");
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(Self {
            schema: parse_schema(content, "<inline>")?,
            path: None,
        })
    }

    /// Check value ranges
    pub fn validate(&self) -> ValidationResult {
        let schema = &self.schema;
        Validator::new()
            .required("general.default_user", &schema.general.default_user)
            .range("matcher.parallel_threshold", schema.matcher.parallel_threshold, 1, usize::MAX)
            .range("pantry.expiring_days", schema.pantry.expiring_days, 1, 365)
            .required("pantry.path", &schema.pantry.path)
            .required("catalog.path", &schema.catalog.path)
            .required("logging.level", &schema.logging.level)
            .validate()
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        "virtualcook.toml",
        ".virtualcook.toml",
        ".config/virtualcook.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e)
    })?;

    parse_schema(&content, path)
}

fn parse_schema(content: &str, origin: &str) -> Result<ConfigSchema> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e: toml::de::Error| Error::from(e).with_context(format!("Parsing {}", origin)))?;

    for warning in validate_config_sections(&table).warnings() {
        tracing::warn!(origin, section = %warning.field, "{}", warning.message);
    }

    toml::from_str(content)
        .map_err(|e: toml::de::Error| Error::from(e).with_context(format!("Parsing {}", origin)))
}
