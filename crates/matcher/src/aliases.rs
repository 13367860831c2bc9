//! Canonical ingredient names.
//!
//! An [`AliasTable`] folds alternative spellings onto one canonical key, so a
//! pantry holding "scallions" satisfies a recipe asking for "green onion".
//! Resolution is a single lookup; chains are rejected at construction.

use crate::error::{MatchError, Result};
use crate::ingredient::{normalize, IngredientSet};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Mapping from alias keys to canonical keys.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
    canonical: HashSet<String>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `canonical -> [alias, ...]` groups, as written in the
    /// `[aliases]` section of the configuration file.
    ///
    /// # Example
    /// ```
    /// use std::collections::BTreeMap;
    /// use virtualcook_matcher::AliasTable;
    ///
    /// let mut groups = BTreeMap::new();
    /// groups.insert("green onion".to_string(), vec!["Scallion".to_string()]);
    ///
    /// let table = AliasTable::from_groups(&groups).unwrap();
    /// assert_eq!(table.resolve("scallion"), "green onion");
    /// ```
    pub fn from_groups(groups: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut table = Self::new();
        for (canonical, aliases) in groups {
            for alias in aliases {
                table.insert(canonical, alias)?;
            }
        }
        Ok(table)
    }

    /// Register `alias` as another name for `canonical`.
    pub fn insert(&mut self, canonical: &str, alias: &str) -> Result<()> {
        let canonical = normalize(canonical).ok_or(MatchError::BlankName("alias table"))?;
        let alias = normalize(alias).ok_or(MatchError::BlankName("alias table"))?;

        if alias == canonical {
            return Ok(());
        }
        if self.canonical.contains(&alias) {
            return Err(MatchError::AliasChain(alias));
        }
        if self.aliases.contains_key(&canonical) {
            return Err(MatchError::AliasChain(canonical));
        }
        if let Some(existing) = self.aliases.get(&alias) {
            if *existing != canonical {
                return Err(MatchError::ConflictingAlias {
                    alias,
                    first: existing.clone(),
                    second: canonical,
                });
            }
            return Ok(());
        }

        self.canonical.insert(canonical.clone());
        self.aliases.insert(alias, canonical);
        Ok(())
    }

    /// Resolve a normalized key to its canonical key.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.aliases.get(key).map_or(key, String::as_str)
    }

    /// Resolve every key in a set.
    pub fn canonicalize(&self, set: &IngredientSet) -> IngredientSet {
        set.iter().map(|key| self.resolve(key)).collect()
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether no aliases are registered.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
