//! Normalized ingredient identifiers.
//!
//! Every comparison in the matcher happens on normalized keys. Normalization
//! trims the name, lowercases it and collapses internal whitespace, so
//! `"  Olive   Oil "` and `"olive oil"` name the same ingredient.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Normalize an ingredient name into its comparison key.
///
/// Returns `None` when nothing is left after trimming.
///
/// # Example
/// ```
/// use virtualcook_matcher::normalize;
///
/// assert_eq!(normalize("  Green   Onion "), Some("green onion".to_string()));
/// assert_eq!(normalize("   "), None);
/// ```
pub fn normalize(name: &str) -> Option<String> {
    let key = name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");

    if key.is_empty() { None } else { Some(key) }
}

/// A single cooking ingredient.
///
/// Equality and hashing use the normalized key only; the display form is kept
/// for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    key: String,
    display: String,
}

impl Ingredient {
    /// Parse a user-entered or catalog ingredient name.
    ///
    /// Returns `None` for names that are blank after normalization.
    pub fn parse(name: &str) -> Option<Self> {
        normalize(name).map(|key| Self {
            key,
            display: name.trim().to_string(),
        })
    }

    /// The normalized comparison key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The trimmed original spelling.
    #[inline]
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl PartialEq for Ingredient {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Ingredient {}

impl std::hash::Hash for Ingredient {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// A set of normalized ingredient keys, typically a pantry snapshot.
///
/// Ordered so that iteration (and therefore debug output and serialization) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientSet {
    keys: BTreeSet<String>,
}

impl IngredientSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw name. Blank names are ignored; returns whether the set
    /// changed.
    pub fn insert(&mut self, name: &str) -> bool {
        match normalize(name) {
            Some(key) => self.keys.insert(key),
            None => false,
        }
    }

    /// Insert an already parsed ingredient.
    pub fn insert_ingredient(&mut self, ingredient: &Ingredient) -> bool {
        self.keys.insert(ingredient.key().to_string())
    }

    /// Check membership of a raw name (normalized before lookup).
    pub fn contains(&self, name: &str) -> bool {
        normalize(name).is_some_and(|key| self.keys.contains(&key))
    }

    /// Check membership of a key that is already normalized.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Number of distinct ingredients.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set holds no ingredients.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over normalized keys in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for IngredientSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  Tomato "), Some("tomato".to_string()));
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("Olive \t  Oil"), Some("olive oil".to_string()));
    }

    #[test]
    fn test_normalize_blank() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize(" \n\t "), None);
    }

    #[test]
    fn test_ingredient_equality_ignores_display() {
        let a = Ingredient::parse("Tomato").unwrap();
        let b = Ingredient::parse(" tomato ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.display(), "Tomato");
        assert_eq!(b.display(), "tomato");
    }

    #[test]
    fn test_set_ignores_blank_names() {
        let set: IngredientSet = ["egg", "  ", "Flour", "EGG"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Egg"));
        assert!(set.contains_key("flour"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_set_iterates_sorted() {
        let set: IngredientSet = ["milk", "butter", "egg"].into_iter().collect();
        let keys: Vec<_> = set.iter().collect();
        assert_eq!(keys, vec!["butter", "egg", "milk"]);
    }
}
