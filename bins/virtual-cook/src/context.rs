//! Settings shared by every command: configuration, resolved file paths,
//! output format and the alias/substitute tables.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use virtualcook_catalog::RecipeCatalog;
use virtualcook_cli::OutputFormat;
use virtualcook_core::config::Config;
use virtualcook_core::{Error, ErrorCode};
use virtualcook_matcher::{AliasTable, MatchError, SubstituteTable};
use virtualcook_pantry::PantryStore;
use virtualcook_telemetry::{init_with_config, TelemetryConfig};

pub struct Context {
    pub config: Config,
    pub format: OutputFormat,
    pub pantry_path: PathBuf,
    pub catalog_path: PathBuf,
    pub user: String,
}

impl Context {
    /// Load configuration, start logging and resolve flag overrides.
    pub fn new(
        config_path: Option<&str>,
        format: OutputFormat,
        verbose: bool,
        pantry: Option<PathBuf>,
        catalog: Option<PathBuf>,
        user: Option<String>,
    ) -> Result<Self> {
        let config = Config::load(config_path)?;

        let level = if verbose {
            "debug".to_string()
        } else {
            config.schema.logging.level.clone()
        };
        init_with_config(TelemetryConfig::new(level, config.schema.logging.json))?;

        let pantry_path = pantry.unwrap_or_else(|| PathBuf::from(&config.schema.pantry.path));
        let catalog_path = catalog.unwrap_or_else(|| PathBuf::from(&config.schema.catalog.path));
        let user = user.unwrap_or_else(|| config.schema.general.default_user.clone());

        tracing::debug!(
            config = ?config.path,
            pantry = %pantry_path.display(),
            catalog = %catalog_path.display(),
            user = %user,
            "Context ready"
        );

        Ok(Self {
            config,
            format,
            pantry_path,
            catalog_path,
            user,
        })
    }

    pub fn load_pantries(&self) -> Result<PantryStore> {
        PantryStore::load(&self.pantry_path).map_err(|e| {
            Error::from(e)
                .with_context(format!("Pantry store {}", self.pantry_path.display()))
                .into()
        })
    }

    pub fn save_pantries(&self, store: &PantryStore) -> Result<()> {
        store.save(&self.pantry_path).map_err(|e| {
            Error::from(e)
                .with_context(format!("Pantry store {}", self.pantry_path.display()))
                .into()
        })
    }

    pub fn load_catalog(&self) -> Result<RecipeCatalog> {
        let catalog = RecipeCatalog::load(&self.catalog_path).map_err(|e| {
            Error::from(e).with_context(format!("Catalog {}", self.catalog_path.display()))
        })?;
        Ok(catalog.with_parallel_threshold(self.config.schema.matcher.parallel_threshold))
    }

    pub fn save_catalog(&self, catalog: &RecipeCatalog) -> Result<()> {
        catalog.save(&self.catalog_path).map_err(|e| {
            Error::from(e)
                .with_context(format!("Catalog {}", self.catalog_path.display()))
                .into()
        })
    }

    /// `[aliases]` from the configuration.
    pub fn aliases(&self) -> Result<AliasTable> {
        AliasTable::from_groups(&self.config.schema.aliases)
            .map_err(|e| table_error(e, "aliases").into())
    }

    /// `[substitutes]` from the configuration.
    pub fn substitutes(&self) -> Result<SubstituteTable> {
        SubstituteTable::from_groups(&self.config.schema.substitutes)
            .map_err(|e| table_error(e, "substitutes").into())
    }

    pub fn is_json(&self) -> bool {
        self.format.is_json()
    }

    /// Print `value` as pretty JSON on stdout.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn table_error(err: MatchError, section: &str) -> Error {
    Error::new(ErrorCode::MatcherTableError, err.to_string())
        .with_context(format!("[{}] section of the configuration", section))
        .with_source(err)
}
