//! Catalog search filters.

use crate::recipe::Recipe;
use serde::{Deserialize, Serialize};
use virtualcook_matcher::{normalize, RelevanceScore};

/// Criteria for [`crate::RecipeCatalog::filter`]. Unset criteria match
/// everything; set criteria must all hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeFilters {
    /// Free text looked up in title, description and cuisine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Cuisine, compared case-insensitively
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Every listed restriction must be tagged on the recipe
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Upper bound on cooking minutes; recipes without a time are excluded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cooking_time: Option<u32>,
    /// Every listed ingredient must be required by the recipe
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl RecipeFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn dietary_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.dietary_restrictions.push(restriction.into());
        self
    }

    pub fn max_cooking_time(mut self, minutes: u32) -> Self {
        self.max_cooking_time = Some(minutes);
        self
    }

    pub fn ingredient(mut self, name: impl Into<String>) -> Self {
        self.ingredients.push(name.into());
        self
    }

    /// Whether `recipe` satisfies every set criterion.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.matches_search(recipe)
            && self.matches_cuisine(recipe)
            && self
                .dietary_restrictions
                .iter()
                .all(|restriction| recipe.has_dietary_restriction(restriction))
            && self
                .max_cooking_time
                .is_none_or(|max| recipe.cooking_time.is_some_and(|time| time <= max))
            && self.matches_ingredients(recipe)
    }

    fn matches_search(&self, recipe: &Recipe) -> bool {
        let Some(query) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
            return true;
        };
        [
            Some(recipe.title.as_str()),
            recipe.description.as_deref(),
            recipe.cuisine.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|text| RelevanceScore::classify(text, query) >= RelevanceScore::Contains)
    }

    fn matches_cuisine(&self, recipe: &Recipe) -> bool {
        let Some(wanted) = self.cuisine.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            return true;
        };
        recipe
            .cuisine
            .as_deref()
            .is_some_and(|cuisine| cuisine.trim().eq_ignore_ascii_case(wanted))
    }

    fn matches_ingredients(&self, recipe: &Recipe) -> bool {
        self.ingredients
            .iter()
            .filter_map(|name| normalize(name))
            .all(|key| {
                recipe
                    .ingredients
                    .iter()
                    .any(|req| req.key().as_deref() == Some(key.as_str()))
            })
    }
}
