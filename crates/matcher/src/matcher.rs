//! Pantry-to-recipe matching.
//!
//! Scoring is presence based: a recipe's score is the rounded share of its
//! distinct required ingredients found in the pantry. Results are ordered by
//! score (highest first), then by number of missing ingredients (fewest
//! first), then by catalog position, which makes the ordering total.

use crate::aliases::AliasTable;
use crate::ingredient::IngredientSet;
use crate::requirement::Matchable;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Score of one recipe against one pantry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Identifier of the scored recipe
    pub recipe_id: String,
    /// Rounded share of required ingredients on hand, 1 to 100
    pub match_percentage: u8,
    /// Required ingredients not on hand, in the recipe's declared order
    pub missing_ingredients: Vec<String>,
    /// Distinct required ingredients on hand
    pub matched_count: usize,
    /// Distinct required ingredients
    pub required_count: usize,
}

impl MatchResult {
    /// Number of missing ingredients.
    #[inline]
    pub fn missing_count(&self) -> usize {
        self.missing_ingredients.len()
    }

    /// Whether every required ingredient is on hand.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.missing_ingredients.is_empty()
    }
}

/// Knobs for a matching run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions<'a> {
    /// Keep at most this many results (`None` keeps all)
    pub limit: Option<usize>,
    /// Resolve names through this table before comparing
    pub aliases: Option<&'a AliasTable>,
}

impl<'a> MatchOptions<'a> {
    /// Unlimited results, free-text matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Match on canonical names from `aliases`.
    pub fn with_aliases(mut self, aliases: &'a AliasTable) -> Self {
        self.aliases = Some(aliases);
        self
    }
}

/// Rank recipes by how much of each the pantry already covers.
///
/// Returns an empty list for an empty pantry. Recipes with no usable
/// requirements, and recipes sharing no ingredient with the pantry, are left
/// out.
///
/// # Example
/// ```
/// use virtualcook_matcher::{match_recipes, IngredientSet, MatchOptions, RecipeSpec};
///
/// let pantry: IngredientSet = ["egg", "flour"].into_iter().collect();
/// let recipes = vec![RecipeSpec::new("pancakes", ["Egg", "Flour", "Milk"])];
///
/// let results = match_recipes(&pantry, &recipes, &MatchOptions::default());
/// assert_eq!(results[0].match_percentage, 67);
/// assert_eq!(results[0].missing_ingredients, vec!["Milk"]);
/// ```
pub fn match_recipes<R: Matchable>(
    pantry: &IngredientSet,
    recipes: &[R],
    options: &MatchOptions<'_>,
) -> Vec<MatchResult> {
    if pantry.is_empty() {
        tracing::debug!(candidates = recipes.len(), "Empty pantry, no matches");
        return Vec::new();
    }

    let pantry = canonical_pantry(pantry, options.aliases);
    let scored: Vec<(usize, MatchResult)> = recipes
        .iter()
        .enumerate()
        .filter_map(|(idx, recipe)| score_canonical(&pantry, recipe, options.aliases).map(|m| (idx, m)))
        .collect();

    tracing::debug!(
        candidates = recipes.len(),
        matched = scored.len(),
        pantry_size = pantry.len(),
        "Scored recipes"
    );

    finish(scored, options.limit)
}

/// Score a single recipe.
///
/// Returns `None` when the recipe has no usable requirements or shares no
/// ingredient with the pantry.
pub fn score_recipe<R: Matchable>(
    pantry: &IngredientSet,
    recipe: &R,
    aliases: Option<&AliasTable>,
) -> Option<MatchResult> {
    let pantry = canonical_pantry(pantry, aliases);
    score_canonical(&pantry, recipe, aliases)
}

/// `round(100 * present / total)`, half away from zero, never below 1 once
/// anything matched.
pub fn match_percentage(present: usize, total: usize) -> u8 {
    if total == 0 || present == 0 {
        return 0;
    }
    let present = present.min(total);
    let rounded = (200 * present + total) / (2 * total);
    // Bounded by 100 since present <= total
    rounded.clamp(1, 100) as u8
}

pub(crate) fn canonical_pantry<'p>(
    pantry: &'p IngredientSet,
    aliases: Option<&AliasTable>,
) -> Cow<'p, IngredientSet> {
    match aliases {
        Some(table) if !table.is_empty() => Cow::Owned(table.canonicalize(pantry)),
        _ => Cow::Borrowed(pantry),
    }
}

/// Score against a pantry whose keys are already canonical.
pub(crate) fn score_canonical<R: Matchable>(
    pantry: &IngredientSet,
    recipe: &R,
    aliases: Option<&AliasTable>,
) -> Option<MatchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut missing = Vec::new();
    let mut present = 0usize;

    for requirement in recipe.requirements() {
        let Some(key) = requirement.key() else {
            continue;
        };
        let key = match aliases {
            Some(table) => table.resolve(&key).to_string(),
            None => key,
        };
        if pantry.contains_key(&key) {
            if seen.insert(key) {
                present += 1;
            }
        } else if seen.insert(key) {
            missing.push(requirement.name.trim().to_string());
        }
    }

    let total = seen.len();
    if total == 0 {
        tracing::trace!(recipe_id = recipe.recipe_id(), "Skipping recipe without requirements");
        return None;
    }
    if present == 0 {
        return None;
    }

    Some(MatchResult {
        recipe_id: recipe.recipe_id().to_string(),
        match_percentage: match_percentage(present, total),
        missing_ingredients: missing,
        matched_count: present,
        required_count: total,
    })
}

/// Total order over scored results: score desc, missing asc, catalog index asc.
pub(crate) fn compare_ranked(a: &(usize, MatchResult), b: &(usize, MatchResult)) -> Ordering {
    b.1.match_percentage
        .cmp(&a.1.match_percentage)
        .then_with(|| a.1.missing_count().cmp(&b.1.missing_count()))
        .then_with(|| a.0.cmp(&b.0))
}

/// Sort, truncate and drop catalog indices.
pub(crate) fn finish(mut scored: Vec<(usize, MatchResult)>, limit: Option<usize>) -> Vec<MatchResult> {
    scored.sort_by(compare_ranked);
    if let Some(max) = limit {
        scored.truncate(max);
    }
    scored.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::{RecipeRequirement, RecipeSpec};

    fn pantry(names: &[&str]) -> IngredientSet {
        names.iter().collect()
    }

    fn run(pantry: &IngredientSet, recipes: &[RecipeSpec]) -> Vec<MatchResult> {
        match_recipes(pantry, recipes, &MatchOptions::default())
    }

    #[test]
    fn test_partial_match_percentage() {
        let recipes = vec![RecipeSpec::new("x", ["egg", "flour", "milk"])];
        let results = run(&pantry(&["egg", "flour"]), &recipes);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_percentage, 67);
        assert_eq!(results[0].missing_ingredients, vec!["milk"]);
        assert_eq!(results[0].matched_count, 2);
        assert_eq!(results[0].required_count, 3);
    }

    #[test]
    fn test_empty_pantry_returns_nothing() {
        let recipes = vec![
            RecipeSpec::new("a", ["egg"]),
            RecipeSpec::new("b", ["milk", "sugar"]),
        ];
        assert!(run(&IngredientSet::new(), &recipes).is_empty());
    }

    #[test]
    fn test_blank_only_pantry_is_empty() {
        let recipes = vec![RecipeSpec::new("a", ["egg"])];
        assert!(run(&pantry(&["  ", ""]), &recipes).is_empty());
    }

    #[test]
    fn test_zero_overlap_excluded() {
        let recipes = vec![
            RecipeSpec::new("y", ["milk", "sugar"]),
            RecipeSpec::new("z", ["egg", "sugar"]),
        ];
        let results = run(&pantry(&["egg"]), &recipes);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe_id, "z");
    }

    #[test]
    fn test_empty_requirements_skipped() {
        let recipes = vec![
            RecipeSpec::new("empty", Vec::<&str>::new()),
            RecipeSpec::new("blank", ["  ", ""]),
            RecipeSpec::new("ok", ["egg"]),
        ];
        let results = run(&pantry(&["egg"]), &recipes);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].recipe_id, "ok");
        assert_eq!(results[0].match_percentage, 100);
    }

    #[test]
    fn test_blank_requirement_not_counted() {
        let recipes = vec![RecipeSpec::new("x", ["egg", " ", "milk"])];
        let results = run(&pantry(&["egg"]), &recipes);
        assert_eq!(results[0].required_count, 2);
        assert_eq!(results[0].match_percentage, 50);
        assert_eq!(results[0].missing_ingredients, vec!["milk"]);
    }

    #[test]
    fn test_case_insensitive() {
        let a = run(
            &pantry(&["Tomato"]),
            &[RecipeSpec::new("r", ["tomato", "onion"])],
        );
        let b = run(
            &pantry(&["tomato"]),
            &[RecipeSpec::new("r", ["Tomato", "onion"])],
        );
        assert_eq!(a[0].match_percentage, b[0].match_percentage);
        assert_eq!(a[0].missing_ingredients, b[0].missing_ingredients);
        assert_eq!(a[0].match_percentage, 50);
    }

    #[test]
    fn test_duplicate_requirements_counted_once() {
        let recipes = vec![RecipeSpec::new("x", ["Egg", "egg ", "milk", "Milk"])];
        let results = run(&pantry(&["egg"]), &recipes);
        assert_eq!(results[0].required_count, 2);
        assert_eq!(results[0].match_percentage, 50);
        assert_eq!(results[0].missing_ingredients, vec!["milk"]);
    }

    #[test]
    fn test_missing_keeps_declared_order_and_display() {
        let recipes = vec![RecipeSpec::new(
            "x",
            ["  Soy Sauce ", "rice", "Garlic", "Ginger"],
        )];
        let results = run(&pantry(&["rice"]), &recipes);
        assert_eq!(
            results[0].missing_ingredients,
            vec!["Soy Sauce", "Garlic", "Ginger"]
        );
    }

    #[test]
    fn test_tie_broken_by_missing_count() {
        let recipes = vec![
            RecipeSpec::new("b", ["egg", "flour", "milk", "sugar", "salt", "butter"]),
            RecipeSpec::new("a", ["egg", "cream"]),
        ];
        let results = run(&pantry(&["egg", "flour", "milk"]), &recipes);
        assert_eq!(results[0].match_percentage, 50);
        assert_eq!(results[1].match_percentage, 50);
        assert_eq!(results[0].recipe_id, "a");
        assert_eq!(results[1].recipe_id, "b");
    }

    #[test]
    fn test_tie_broken_by_catalog_order() {
        let recipes = vec![
            RecipeSpec::new("first", ["egg", "milk"]),
            RecipeSpec::new("second", ["egg", "sugar"]),
            RecipeSpec::new("third", ["egg", "salt"]),
        ];
        let ids: Vec<_> = run(&pantry(&["egg"]), &recipes)
            .into_iter()
            .map(|r| r.recipe_id)
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sorted_by_percentage_desc() {
        let recipes = vec![
            RecipeSpec::new("low", ["egg", "a", "b", "c"]),
            RecipeSpec::new("full", ["egg"]),
            RecipeSpec::new("half", ["egg", "d"]),
        ];
        let ids: Vec<_> = run(&pantry(&["egg"]), &recipes)
            .into_iter()
            .map(|r| r.recipe_id)
            .collect();
        assert_eq!(ids, vec!["full", "half", "low"]);
    }

    #[test]
    fn test_limit_truncates() {
        let recipes = vec![
            RecipeSpec::new("a", ["egg"]),
            RecipeSpec::new("b", ["egg", "milk"]),
            RecipeSpec::new("c", ["egg", "milk", "flour"]),
        ];
        let options = MatchOptions::new().with_limit(2);
        let results = match_recipes(&pantry(&["egg"]), &recipes, &options);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].recipe_id, "a");

        let none = match_recipes(&pantry(&["egg"]), &recipes, &MatchOptions::new().with_limit(0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_aliases_resolve_both_sides() {
        let mut table = AliasTable::new();
        table.insert("green onion", "scallion").unwrap();
        let recipes = vec![RecipeSpec::new("x", ["Green Onion", "rice"])];
        let options = MatchOptions::new().with_aliases(&table);

        let results = match_recipes(&pantry(&["Scallion"]), &recipes, &options);
        assert_eq!(results[0].match_percentage, 50);
        assert_eq!(results[0].missing_ingredients, vec!["rice"]);

        let plain = run(&pantry(&["Scallion"]), &recipes);
        assert!(plain.is_empty());
    }

    #[test]
    fn test_alias_duplicates_collapse() {
        let mut table = AliasTable::new();
        table.insert("coriander", "cilantro").unwrap();
        let recipes = vec![RecipeSpec::new("x", ["cilantro", "coriander", "lime"])];
        let options = MatchOptions::new().with_aliases(&table);
        let results = match_recipes(&pantry(&["coriander"]), &recipes, &options);
        assert_eq!(results[0].required_count, 2);
        assert_eq!(results[0].match_percentage, 50);
    }

    #[test]
    fn test_inputs_untouched() {
        let p = pantry(&["egg"]);
        let recipes = vec![RecipeSpec {
            id: "x".into(),
            requirements: vec![RecipeRequirement::new(" Egg ", "2")],
        }];
        let before = (p.clone(), recipes.clone());
        let _ = run(&p, &recipes);
        assert_eq!(before, (p, recipes));
    }

    #[test]
    fn test_match_percentage_rounding() {
        assert_eq!(match_percentage(2, 3), 67);
        assert_eq!(match_percentage(1, 3), 33);
        assert_eq!(match_percentage(1, 8), 13);
        assert_eq!(match_percentage(1, 2), 50);
        assert_eq!(match_percentage(3, 3), 100);
        assert_eq!(match_percentage(0, 3), 0);
        assert_eq!(match_percentage(1, 0), 0);
    }

    #[test]
    fn test_match_percentage_never_zero_when_present() {
        assert_eq!(match_percentage(1, 500), 1);
    }

    #[test]
    fn test_score_recipe_single() {
        let spec = RecipeSpec::new("x", ["egg", "milk"]);
        let result = score_recipe(&pantry(&["EGG"]), &spec, None).unwrap();
        assert_eq!(result.match_percentage, 50);
        assert!(score_recipe(&pantry(&["salt"]), &spec, None).is_none());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let recipes = vec![RecipeSpec::new("x", ["egg", "milk"])];
        let results = run(&pantry(&["egg"]), &recipes);
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["recipeId"], "x");
        assert_eq!(json["matchPercentage"], 50);
        assert_eq!(json["missingIngredients"][0], "milk");
    }
}
