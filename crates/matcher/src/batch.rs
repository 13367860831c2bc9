//! Batch matching with optional parallelism.
//!
//! Recipes are scored independently, so the catalog can be split across
//! worker threads. Results are re-sorted with the same total order as the
//! sequential path, so both paths return identical output.

use crate::ingredient::IngredientSet;
use crate::matcher::{canonical_pantry, finish, match_recipes, score_canonical, MatchOptions, MatchResult};
use crate::requirement::Matchable;

/// Catalog size at which [`match_catalog`] switches to the parallel path.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Score a catalog across worker threads.
///
/// Without the `parallel` feature this is the sequential matcher.
///
/// # Example
/// ```
/// use virtualcook_matcher::{match_recipes_parallel, IngredientSet, MatchOptions, RecipeSpec};
///
/// let pantry: IngredientSet = ["rice", "egg"].into_iter().collect();
/// let recipes: Vec<_> = (0..100)
///     .map(|i| RecipeSpec::new(format!("r{i}"), ["rice", "soy sauce"]))
///     .collect();
///
/// let results = match_recipes_parallel(&pantry, &recipes, &MatchOptions::default());
/// assert_eq!(results.len(), 100);
/// assert_eq!(results[0].recipe_id, "r0");
/// ```
pub fn match_recipes_parallel<R>(
    pantry: &IngredientSet,
    recipes: &[R],
    options: &MatchOptions<'_>,
) -> Vec<MatchResult>
where
    R: Matchable + Sync,
{
    if pantry.is_empty() {
        return Vec::new();
    }

    let pantry = canonical_pantry(pantry, options.aliases);
    let aliases = options.aliases;

    #[cfg(feature = "parallel")]
    let scored: Vec<(usize, MatchResult)> = {
        use rayon::prelude::*;
        recipes
            .par_iter()
            .enumerate()
            .filter_map(|(idx, recipe)| score_canonical(&pantry, recipe, aliases).map(|m| (idx, m)))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let scored: Vec<(usize, MatchResult)> = recipes
        .iter()
        .enumerate()
        .filter_map(|(idx, recipe)| score_canonical(&pantry, recipe, aliases).map(|m| (idx, m)))
        .collect();

    tracing::debug!(
        candidates = recipes.len(),
        matched = scored.len(),
        "Scored recipes in parallel"
    );

    finish(scored, options.limit)
}

/// Pick the sequential or parallel path by catalog size.
pub fn match_catalog<R>(
    pantry: &IngredientSet,
    recipes: &[R],
    options: &MatchOptions<'_>,
    parallel_threshold: usize,
) -> Vec<MatchResult>
where
    R: Matchable + Sync,
{
    if recipes.len() >= parallel_threshold {
        match_recipes_parallel(pantry, recipes, options)
    } else {
        match_recipes(pantry, recipes, options)
    }
}

/// Match several pantries against one catalog snapshot.
///
/// The outer vector lines up with `pantries`.
pub fn match_many_pantries<R>(
    pantries: &[IngredientSet],
    recipes: &[R],
    options: &MatchOptions<'_>,
) -> Vec<Vec<MatchResult>>
where
    R: Matchable + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pantries
            .par_iter()
            .map(|pantry| match_recipes(pantry, recipes, options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        pantries
            .iter()
            .map(|pantry| match_recipes(pantry, recipes, options))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::AliasTable;
    use crate::requirement::RecipeSpec;

    fn create_test_catalog() -> Vec<RecipeSpec> {
        let pool = ["egg", "flour", "milk", "sugar", "butter", "salt", "rice", "garlic"];
        (0..200)
            .map(|i| {
                let names: Vec<&str> = pool
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (i + j) % 3 != 0)
                    .map(|(_, name)| *name)
                    .take(1 + i % 7)
                    .collect();
                RecipeSpec::new(format!("recipe-{i}"), names)
            })
            .collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let recipes = create_test_catalog();
        let pantry: IngredientSet = ["egg", "milk", "garlic"].into_iter().collect();
        let options = MatchOptions::default();

        assert_eq!(
            match_recipes_parallel(&pantry, &recipes, &options),
            match_recipes(&pantry, &recipes, &options)
        );
    }

    #[test]
    fn test_parallel_with_limit_and_aliases() {
        let recipes = create_test_catalog();
        let mut table = AliasTable::new();
        table.insert("garlic", "garlic clove").unwrap();
        let pantry: IngredientSet = ["Garlic Clove", "rice"].into_iter().collect();
        let options = MatchOptions::new().with_limit(6).with_aliases(&table);

        let parallel = match_recipes_parallel(&pantry, &recipes, &options);
        assert_eq!(parallel.len(), 6);
        assert_eq!(parallel, match_recipes(&pantry, &recipes, &options));
    }

    #[test]
    fn test_parallel_empty_pantry() {
        let recipes = create_test_catalog();
        assert!(match_recipes_parallel(&IngredientSet::new(), &recipes, &MatchOptions::default()).is_empty());
    }

    #[test]
    fn test_match_catalog_threshold() {
        let recipes = create_test_catalog();
        let pantry: IngredientSet = ["flour"].into_iter().collect();
        let options = MatchOptions::default();

        let below = match_catalog(&pantry, &recipes, &options, usize::MAX);
        let above = match_catalog(&pantry, &recipes, &options, 0);
        assert_eq!(below, above);
    }

    #[test]
    fn test_many_pantries_aligned() {
        let recipes = vec![
            RecipeSpec::new("omelette", ["egg", "butter"]),
            RecipeSpec::new("rice bowl", ["rice", "egg"]),
        ];
        let pantries: Vec<IngredientSet> = vec![
            ["egg"].into_iter().collect(),
            IngredientSet::new(),
            ["rice"].into_iter().collect(),
        ];

        let results = match_many_pantries(&pantries, &recipes, &MatchOptions::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 2);
        assert!(results[1].is_empty());
        assert_eq!(results[2][0].recipe_id, "rice bowl");
    }
}
