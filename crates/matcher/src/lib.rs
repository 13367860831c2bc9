//! Ingredient-based recipe matching for Virtual Cook.
//!
//! This crate provides:
//! - Ingredient name normalization and pantry ingredient sets
//! - Presence-based recipe scoring with a deterministic ranking
//! - Parallel batch matching over large catalogs
//! - Canonical ingredient aliases and substitute suggestions
//! - Fuzzy "did you mean" suggestions for ingredient names
//!
//! # Example
//!
//! ```
//! use virtualcook_matcher::{match_recipes, IngredientSet, MatchOptions, RecipeSpec};
//!
//! let pantry: IngredientSet = ["egg", "flour"].into_iter().collect();
//! let recipes = vec![
//!     RecipeSpec::new("pancakes", ["egg", "flour", "milk"]),
//!     RecipeSpec::new("meringue", ["egg white", "sugar"]),
//! ];
//!
//! let results = match_recipes(&pantry, &recipes, &MatchOptions::default().with_limit(6));
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].recipe_id, "pancakes");
//! ```

mod aliases;
pub mod batch;
mod error;
mod fuzzy;
mod ingredient;
mod matcher;
mod relevance;
mod requirement;
mod substitutes;

pub use aliases::AliasTable;
pub use batch::{match_catalog, match_many_pantries, match_recipes_parallel, DEFAULT_PARALLEL_THRESHOLD};
pub use error::{MatchError, MatchErrorCode, Result};
pub use fuzzy::{fuzzy_match, levenshtein_distance, suggest_ingredients, Suggestion};
pub use ingredient::{normalize, Ingredient, IngredientSet};
pub use matcher::{match_percentage, match_recipes, score_recipe, MatchOptions, MatchResult};
pub use relevance::{calculate_relevance, RelevanceScore};
pub use requirement::{Matchable, RecipeRequirement, RecipeSpec};
pub use substitutes::{suggest_substitutes, SubstituteTable, Substitution};
