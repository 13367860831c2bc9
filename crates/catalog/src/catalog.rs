//! The recipe catalog and pantry-based recommendations.

use crate::error::{CatalogError, Result};
use crate::filters::RecipeFilters;
use crate::recipe::{NewRecipe, Recipe, RecipeStatus};
use chrono::Utc;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;
use virtualcook_matcher::{
    match_catalog, IngredientSet, MatchOptions, MatchResult, DEFAULT_PARALLEL_THRESHOLD,
};

/// A recipe paired with how well the pantry covers it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub recipe: &'a Recipe,
    #[serde(flatten)]
    pub result: MatchResult,
}

impl Recommendation<'_> {
    pub fn match_percentage(&self) -> u8 {
        self.result.match_percentage
    }

    /// Missing ingredients in the recipe's declared order.
    pub fn missing_ingredients(&self) -> &[String] {
        &self.result.missing_ingredients
    }
}

/// Recipes in catalog order.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    parallel_threshold: usize,
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self {
            recipes: Vec::new(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, rejecting blank or duplicate ids.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Result<Self> {
        let mut seen = HashSet::new();
        for recipe in &recipes {
            if recipe.id.trim().is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "recipe '{}' has no id",
                    recipe.title
                )));
            }
            if !seen.insert(recipe.id.as_str()) {
                return Err(CatalogError::Duplicate(recipe.id.clone()));
            }
        }
        Ok(Self {
            recipes,
            ..Self::default()
        })
    }

    /// Read a JSON array of recipes.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let recipes: Vec<Recipe> = serde_json::from_str(&content)?;
        let catalog = Self::from_recipes(recipes)?;

        let unusable = catalog
            .recipes
            .iter()
            .filter(|r| r.ingredients.iter().all(|i| i.key().is_none()))
            .count();
        if unusable > 0 {
            tracing::warn!(
                path = %path.display(),
                unusable,
                "Recipes without ingredient names will never be recommended"
            );
        }
        tracing::debug!(path = %path.display(), recipes = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Write the catalog as a pretty JSON array, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(&self.recipes)?)?;
        tracing::debug!(path = %path.display(), recipes = self.len(), "Catalog saved");
        Ok(())
    }

    /// Catalog size at which [`RecipeCatalog::recommend`] runs on worker threads.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// Validate and store a user submission as a pending recipe.
    pub fn submit(&mut self, recipe: NewRecipe) -> Result<&Recipe> {
        let result = recipe.validate();
        if !result.is_valid() {
            let messages: Vec<String> = result.errors().iter().map(ToString::to_string).collect();
            return Err(CatalogError::Invalid(messages.join("; ")));
        }

        let id = Uuid::new_v4().to_string();
        tracing::debug!(id = %id, title = %recipe.title, "Recipe submitted");
        self.recipes.push(recipe.into_recipe(id, Utc::now()));
        Ok(&self.recipes[self.recipes.len() - 1])
    }

    /// Mark a recipe approved. Approving twice is a no-op.
    pub fn approve(&mut self, id: &str) -> Result<&Recipe> {
        let idx = self.position(id)?;
        let recipe = &mut self.recipes[idx];
        if recipe.status != RecipeStatus::Approved {
            recipe.status = RecipeStatus::Approved;
            recipe.updated_at = Utc::now();
            tracing::debug!(id, "Recipe approved");
        }
        Ok(&self.recipes[idx])
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Result<Recipe> {
        let idx = self.position(id)?;
        Ok(self.recipes.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Every recipe, pending ones included.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Approved recipes in catalog order.
    pub fn approved(&self) -> Vec<&Recipe> {
        self.recipes.iter().filter(|r| r.is_approved()).collect()
    }

    /// Approved recipes satisfying `filters`, in catalog order.
    pub fn filter(&self, filters: &RecipeFilters) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.is_approved() && filters.matches(r))
            .collect()
    }

    /// Rank approved recipes by pantry coverage.
    pub fn recommend(
        &self,
        pantry: &IngredientSet,
        options: &MatchOptions<'_>,
    ) -> Vec<Recommendation<'_>> {
        let approved = self.approved();
        let results = match_catalog(pantry, &approved, options, self.parallel_threshold);
        let by_id: HashMap<&str, &Recipe> = approved.iter().map(|r| (r.id.as_str(), *r)).collect();

        results
            .into_iter()
            .filter_map(|result| {
                let recipe = by_id.get(result.recipe_id.as_str()).copied()?;
                Some(Recommendation { recipe, result })
            })
            .collect()
    }

    /// Distinct normalized ingredient names used by approved recipes.
    pub fn known_ingredients(&self) -> BTreeSet<String> {
        self.recipes
            .iter()
            .filter(|r| r.is_approved())
            .flat_map(|r| r.ingredients.iter().filter_map(|i| i.key()))
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}
