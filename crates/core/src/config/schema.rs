//! Configuration schema definitions
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub matcher: MatcherConfig,

    #[serde(default)]
    pub pantry: PantryConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Canonical ingredient name -> alternative names
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,

    /// Ingredient -> acceptable substitutes
    #[serde(default)]
    pub substitutes: BTreeMap<String, Vec<String>>,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// User whose pantry is used when no `--user` is given
    #[serde(default = "default_user")]
    pub default_user: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_user: default_user(),
        }
    }
}

fn default_user() -> String {
    "me".to_string()
}

/// Recommendation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Maximum recommendations shown (unset shows all)
    #[serde(default)]
    pub default_limit: Option<usize>,

    /// Catalog size at which matching runs on worker threads
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            default_limit: None,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_parallel_threshold() -> usize {
    512
}

/// Pantry storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryConfig {
    /// Pantry store file
    #[serde(default = "default_pantry_path")]
    pub path: String,

    /// Count expired items as on hand
    #[serde(default)]
    pub include_expired: bool,

    /// Window used by `pantry expiring`, in days
    #[serde(default = "default_expiring_days")]
    pub expiring_days: u32,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            path: default_pantry_path(),
            include_expired: false,
            expiring_days: default_expiring_days(),
        }
    }
}

fn default_pantry_path() -> String {
    "pantry.json".to_string()
}

fn default_expiring_days() -> u32 {
    3
}

/// Recipe catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (JSON array of recipes)
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> String {
    "recipes.json".to_string()
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
