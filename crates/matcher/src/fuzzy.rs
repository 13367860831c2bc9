//! Fuzzy ingredient name matching.
//!
//! Pantry entries are free text, so a typo ("tomatoe") silently matches
//! nothing. These helpers rank known ingredient names against a query to offer
//! corrections.

use crate::ingredient::normalize;
use crate::relevance::{calculate_relevance, RelevanceScore};
use serde::{Deserialize, Serialize};

/// Largest edit distance still offered as a suggestion for short names.
const MIN_DISTANCE_BUDGET: usize = 2;

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Check if text contains all characters of query in order.
///
/// # Returns
/// true if all query characters are found in order
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    let mut text_chars = text.chars();

    query
        .chars()
        .all(|query_char| text_chars.by_ref().any(|c| c == query_char))
}

/// A known ingredient name offered as a correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The known ingredient name (normalized)
    pub name: String,
    /// How the name relates to the query
    pub relevance: u32,
    /// Edit distance from the normalized query
    pub distance: usize,
}

/// Rank `known` ingredient names against `query`.
///
/// A name qualifies if it relates to the query textually (prefix, word,
/// substring, in-order characters) or sits within a small edit distance
/// (a third of the query length, at least two edits). Results are ordered by
/// relevance (desc), distance (asc), then name.
///
/// # Example
/// ```
/// use virtualcook_matcher::suggest_ingredients;
///
/// let known = ["tomato", "potato", "tofu"];
/// let suggestions = suggest_ingredients("tomatoe", known, 3);
/// assert_eq!(suggestions[0].name, "tomato");
/// ```
pub fn suggest_ingredients<I, S>(query: &str, known: I, max_results: usize) -> Vec<Suggestion>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Some(query) = normalize(query) else {
        return Vec::new();
    };
    let budget = (query.chars().count() / 3).max(MIN_DISTANCE_BUDGET);

    let mut names: Vec<String> = known
        .into_iter()
        .filter_map(|name| normalize(name.as_ref()))
        .collect();
    names.sort();
    names.dedup();

    let mut suggestions: Vec<Suggestion> = names
        .into_iter()
        .filter_map(|name| {
            let relevance = calculate_relevance(&name, &query);
            let distance = levenshtein_distance(&name, &query);
            let related = relevance > RelevanceScore::None as u32;
            (related || distance <= budget).then_some(Suggestion {
                name,
                relevance,
                distance,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| a.distance.cmp(&b.distance))
            .then_with(|| a.name.cmp(&b.name))
    });
    suggestions.truncate(max_results);
    suggestions
}
