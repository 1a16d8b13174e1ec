//! Text normalization shared by the sort engine and the fuzzy matcher.
//!
//! Both comparisons work on lowercased text; search additionally splits it
//! into tokens on runs of whitespace. There is no locale-aware collation:
//! lowercasing is Unicode simple case mapping as done by [`str::to_lowercase`].

/// Lowercase `text` for comparison.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Lowercase `text` and split it into tokens on runs of whitespace.
///
/// Leading and trailing whitespace never produce empty tokens, so an empty
/// or whitespace-only input yields no tokens at all.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Number of characters in `keyword` once trimmed, lowercased, and stripped
/// of space characters. This is the length the tolerance threshold scales with.
pub fn keyword_len(keyword: &str) -> usize {
    normalize(keyword.trim()).chars().filter(|c| *c != ' ').count()
}
