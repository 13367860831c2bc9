//! Ingredient substitutes.
//!
//! A [`SubstituteTable`] records which ingredients can stand in for others
//! ("margarine" for "butter"). Substitutes are advisory: they never change a
//! recipe's score or rank, they only annotate missing ingredients.

use crate::aliases::AliasTable;
use crate::error::{MatchError, Result};
use crate::ingredient::{normalize, IngredientSet};
use crate::matcher::{canonical_pantry, MatchResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Directed substitute lists keyed by normalized ingredient.
#[derive(Debug, Clone, Default)]
pub struct SubstituteTable {
    entries: HashMap<String, Vec<String>>,
}

impl SubstituteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `ingredient -> [substitute, ...]` groups, as written in the
    /// `[substitutes]` configuration section.
    pub fn from_groups(groups: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut table = Self::new();
        for (ingredient, substitutes) in groups {
            for substitute in substitutes {
                table.insert(ingredient, substitute)?;
            }
        }
        Ok(table)
    }

    /// Record that `substitute` can replace `ingredient`.
    pub fn insert(&mut self, ingredient: &str, substitute: &str) -> Result<()> {
        let ingredient = normalize(ingredient).ok_or(MatchError::BlankName("substitute table"))?;
        let substitute = normalize(substitute).ok_or(MatchError::BlankName("substitute table"))?;
        if ingredient == substitute {
            return Err(MatchError::SelfSubstitute(ingredient));
        }

        let list = self.entries.entry(ingredient).or_default();
        if !list.contains(&substitute) {
            list.push(substitute);
        }
        Ok(())
    }

    /// Substitutes for a raw ingredient name, in insertion order.
    pub fn substitutes_for(&self, name: &str) -> &[String] {
        normalize(name)
            .and_then(|key| self.entries.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of ingredients with at least one substitute.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A missing ingredient that the pantry can cover with a substitute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Missing ingredient, as the recipe spells it
    pub missing: String,
    /// Substitutes already in the pantry
    pub available: Vec<String>,
}

/// List pantry substitutes for each missing ingredient of `result`.
///
/// Missing ingredients with no substitute on hand are omitted. When an alias
/// table is given, the pantry lookup goes through canonical names.
pub fn suggest_substitutes(
    result: &MatchResult,
    pantry: &IngredientSet,
    table: &SubstituteTable,
    aliases: Option<&AliasTable>,
) -> Vec<Substitution> {
    let pantry = canonical_pantry(pantry, aliases);
    let on_hand = |name: &str| {
        normalize(name).is_some_and(|key| {
            pantry.contains_key(aliases.map_or(key.as_str(), |table| table.resolve(&key)))
        })
    };

    result
        .missing_ingredients
        .iter()
        .filter_map(|missing| {
            let available: Vec<String> = table
                .substitutes_for(missing)
                .iter()
                .filter(|substitute| on_hand(substitute))
                .cloned()
                .collect();
            (!available.is_empty()).then(|| Substitution {
                missing: missing.clone(),
                available,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{match_recipes, MatchOptions};
    use crate::requirement::RecipeSpec;

    fn table() -> SubstituteTable {
        let mut table = SubstituteTable::new();
        table.insert("Butter", "margarine").unwrap();
        table.insert("butter", "coconut oil").unwrap();
        table.insert("buttermilk", "yogurt").unwrap();
        table
    }

    #[test]
    fn test_substitutes_for() {
        let table = table();
        assert_eq!(table.substitutes_for(" BUTTER "), ["margarine", "coconut oil"]);
        assert!(table.substitutes_for("flour").is_empty());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_self_substitute_rejected() {
        let mut table = SubstituteTable::new();
        assert_eq!(
            table.insert("Egg", "egg"),
            Err(MatchError::SelfSubstitute("egg".to_string()))
        );
    }

    #[test]
    fn test_duplicate_substitute_ignored() {
        let mut table = SubstituteTable::new();
        table.insert("sugar", "honey").unwrap();
        table.insert("sugar", "Honey").unwrap();
        assert_eq!(table.substitutes_for("sugar").len(), 1);
    }

    #[test]
    fn test_suggest_substitutes_from_pantry() {
        let pantry: IngredientSet = ["flour", "coconut oil", "yogurt"].into_iter().collect();
        let recipes = vec![RecipeSpec::new("cake", ["flour", "Butter", "Buttermilk", "sugar"])];
        let results = match_recipes(&pantry, &recipes, &MatchOptions::default());
        let before = results[0].match_percentage;

        let subs = suggest_substitutes(&results[0], &pantry, &table(), None);
        assert_eq!(
            subs,
            vec![
                Substitution {
                    missing: "Butter".to_string(),
                    available: vec!["coconut oil".to_string()],
                },
                Substitution {
                    missing: "Buttermilk".to_string(),
                    available: vec!["yogurt".to_string()],
                },
            ]
        );
        assert_eq!(results[0].match_percentage, before);
    }

    #[test]
    fn test_suggest_substitutes_through_aliases() {
        let mut aliases = AliasTable::new();
        aliases.insert("margarine", "oleo").unwrap();
        let pantry: IngredientSet = ["Oleo", "flour"].into_iter().collect();
        let recipes = vec![RecipeSpec::new("cookies", ["flour", "butter"])];
        let results = match_recipes(&pantry, &recipes, &MatchOptions::default());

        let subs = suggest_substitutes(&results[0], &pantry, &table(), Some(&aliases));
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].available, vec!["margarine"]);
    }
}
