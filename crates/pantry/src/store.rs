//! JSON file holding every user's pantry.

use crate::error::{PantryError, Result};
use crate::pantry::Pantry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// All pantries, keyed by user id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PantryStore {
    #[serde(default)]
    pantries: BTreeMap<String, Pantry>,
}

impl PantryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a store file. A missing file is an empty store.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No pantry store, starting empty");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let store: Self = serde_json::from_str(&content)?;

        for (user, pantry) in &store.pantries {
            if user != pantry.user_id() {
                return Err(PantryError::InvalidUser(format!(
                    "{} (stored under '{}')",
                    pantry.user_id(),
                    user
                )));
            }
            pantry.validate()?;
        }

        tracing::debug!(path = %path.display(), users = store.pantries.len(), "Pantry store loaded");
        Ok(store)
    }

    /// Write the store as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "Pantry store saved");
        Ok(())
    }

    /// A user's pantry, if one exists.
    pub fn pantry(&self, user_id: &str) -> Option<&Pantry> {
        self.pantries.get(user_id)
    }

    /// A user's pantry, created empty on first use.
    pub fn pantry_mut(&mut self, user_id: &str) -> Result<&mut Pantry> {
        if !self.pantries.contains_key(user_id) {
            let pantry = Pantry::new(user_id)?;
            self.pantries.insert(user_id.to_string(), pantry);
        }
        self.pantries
            .get_mut(user_id)
            .ok_or_else(|| PantryError::InvalidUser(user_id.to_string()))
    }

    /// User ids with a stored pantry, sorted.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.pantries.keys().map(String::as_str)
    }

    /// Number of stored pantries.
    pub fn len(&self) -> usize {
        self.pantries.len()
    }

    /// Whether no pantry is stored.
    pub fn is_empty(&self) -> bool {
        self.pantries.is_empty()
    }
}
