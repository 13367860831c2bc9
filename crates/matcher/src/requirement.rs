//! Recipe requirements and the seam between recipes and the matcher.

use crate::ingredient::{normalize, Ingredient};
use serde::{Deserialize, Serialize};

/// One ingredient a recipe declares, e.g. `{ name: "flour", quantity: "2 cups" }`.
///
/// The quantity is informational; matching is presence-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequirement {
    /// Ingredient name as written by the recipe author
    pub name: String,
    /// Free-form quantity ("2", "1/2 cup", "to taste")
    #[serde(default)]
    pub quantity: String,
    /// Optional unit kept apart from the quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl RecipeRequirement {
    /// Create a requirement with a quantity and no separate unit.
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: None,
        }
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Parsed ingredient, or `None` when the name is blank.
    pub fn ingredient(&self) -> Option<Ingredient> {
        Ingredient::parse(&self.name)
    }

    /// Normalized key, or `None` when the name is blank.
    pub fn key(&self) -> Option<String> {
        normalize(&self.name)
    }
}

impl From<&str> for RecipeRequirement {
    fn from(name: &str) -> Self {
        Self::new(name, "")
    }
}

/// Anything the matcher can score: an identifier plus a requirement list.
///
/// Implemented by the catalog's recipe type; tests implement it on small
/// fixtures.
pub trait Matchable {
    /// Stable identifier reported back in [`crate::MatchResult::recipe_id`].
    fn recipe_id(&self) -> &str;

    /// Declared requirements, in author order.
    fn requirements(&self) -> &[RecipeRequirement];
}

impl<T: Matchable + ?Sized> Matchable for &T {
    fn recipe_id(&self) -> &str {
        (**self).recipe_id()
    }

    fn requirements(&self) -> &[RecipeRequirement] {
        (**self).requirements()
    }
}

/// Minimal owned recipe used where no richer recipe type is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSpec {
    /// Recipe identifier
    pub id: String,
    /// Required ingredients
    pub requirements: Vec<RecipeRequirement>,
}

impl RecipeSpec {
    /// Build a recipe from an id and a list of ingredient names.
    pub fn new<I, S>(id: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            id: id.into(),
            requirements: names
                .into_iter()
                .map(|name| RecipeRequirement::from(name.as_ref()))
                .collect(),
        }
    }
}

impl Matchable for RecipeSpec {
    fn recipe_id(&self) -> &str {
        &self.id
    }

    fn requirements(&self) -> &[RecipeRequirement] {
        &self.requirements
    }
}
