//! Recipe catalog for Virtual Cook.
//!
//! Holds submitted and approved recipes, answers filtered searches and turns
//! a pantry snapshot into ranked [`Recommendation`]s. Only approved recipes
//! are searched or recommended.
//!
//! ```rust
//! use virtualcook_catalog::{NewRecipe, RecipeCatalog};
//! use virtualcook_matcher::{IngredientSet, MatchOptions, RecipeRequirement};
//!
//! let mut catalog = RecipeCatalog::new();
//! let id = catalog
//!     .submit(NewRecipe {
//!         title: "Fried Rice".into(),
//!         description: "Leftover rice, fried".into(),
//!         ingredients: vec![
//!             RecipeRequirement::new("Rice", "2 cups"),
//!             RecipeRequirement::new("Egg", "2"),
//!         ],
//!         instructions: vec!["Fry everything".into()],
//!         ..NewRecipe::default()
//!     })
//!     .unwrap()
//!     .id
//!     .clone();
//! catalog.approve(&id).unwrap();
//!
//! let pantry: IngredientSet = ["rice"].into_iter().collect();
//! let recs = catalog.recommend(&pantry, &MatchOptions::new());
//! assert_eq!(recs[0].match_percentage(), 50);
//! assert_eq!(recs[0].missing_ingredients(), vec!["Egg"]);
//! ```

mod catalog;
mod error;
mod filters;
mod recipe;

pub use catalog::{RecipeCatalog, Recommendation};
pub use error::{CatalogError, Result};
pub use filters::RecipeFilters;
pub use recipe::{NewRecipe, NutritionalInfo, Recipe, RecipeStatus};
