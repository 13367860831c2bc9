//! Textual relevance between a known name and a query.
//!
//! Used to rank ingredient suggestions and catalog search hits. Both inputs
//! are compared case-insensitively.

/// Relevance levels, highest wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelevanceScore {
    /// No relation
    None = 0,
    /// Query characters appear in order
    Fuzzy = 10,
    /// Query is a substring
    Contains = 20,
    /// A later word starts with the query ("brown rice" for "ri")
    WordBoundary = 30,
    /// Name starts with the query
    StartsWith = 40,
    /// Same name
    Exact = 50,
}

impl RelevanceScore {
    /// Classify `text` against `query`.
    pub fn classify(text: &str, query: &str) -> Self {
        let text = text.to_lowercase();
        let query = query.to_lowercase();

        if query.is_empty() {
            return Self::None;
        }
        if text == query {
            Self::Exact
        } else if text.starts_with(&query) {
            Self::StartsWith
        } else if text.split_whitespace().skip(1).any(|word| word.starts_with(&query)) {
            Self::WordBoundary
        } else if text.contains(&query) {
            Self::Contains
        } else if crate::fuzzy_match(&text, &query) {
            Self::Fuzzy
        } else {
            Self::None
        }
    }
}

/// Numeric relevance of `text` for `query` (higher is better).
pub fn calculate_relevance(text: &str, query: &str) -> u32 {
    RelevanceScore::classify(text, query) as u32
}
