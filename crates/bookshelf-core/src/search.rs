//! Tokenized fuzzy search with a length-scaled tolerance, plus ranking.
//!
//! The matcher operates on an in-memory catalog slice and has no I/O. The
//! calling application is responsible for loading records, choosing the
//! target field, and presenting the ranked [`MatchResult`]s.
//!
//! # Scoring Algorithm
//!
//! 1. Lowercase and trim the keyword; split it into query tokens on
//!    whitespace. No tokens means no results.
//! 2. For each record, lowercase the target field and split it into target
//!    tokens.
//! 3. For each query token, take the minimum edit distance to any target
//!    token. A record with no target tokens cannot match.
//! 4. Sum the per-token minima into the record's score.
//! 5. Accept the record if `score <= tolerance_ratio × keyword_len`, where
//!    `keyword_len` counts the keyword's characters excluding spaces.
//! 6. Rank accepted records by score (asc), then code (asc).
//!
//! Step 2–5 is independent per record and runs on the rayon pool for
//! catalogs of at least [`SearchParams::parallel_threshold`] records when
//! the `parallel` feature is enabled. Ranking happens after collection, so
//! the output is identical either way.

use std::cmp::Ordering;

use tracing::debug;

use crate::distance::char_distance;
use crate::models::{BookRecord, Field, MatchResult};
use crate::text;

/// Fraction of the keyword length tolerated as cumulative edit distance.
pub const DEFAULT_TOLERANCE_RATIO: f64 = 0.7;

/// Minimum catalog size for parallel scoring.
///
/// Below this, thread pool coordination costs more than the per-record
/// distance computations it would spread out.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Matcher tuning parameters, decoupled from application config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Tolerated distance per keyword character: `tolerance = ratio × len`.
    pub tolerance_ratio: f64,
    /// Catalog size at which scoring switches to parallel iteration.
    pub parallel_threshold: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            tolerance_ratio: DEFAULT_TOLERANCE_RATIO,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Search `catalog` on `field` with default parameters and rank the hits.
pub fn search(keyword: &str, catalog: &[BookRecord], field: Field) -> Vec<MatchResult> {
    search_with(keyword, catalog, field, &SearchParams::default())
}

/// Search `catalog` on `field` with explicit parameters and rank the hits.
pub fn search_with(
    keyword: &str,
    catalog: &[BookRecord],
    field: Field,
    params: &SearchParams,
) -> Vec<MatchResult> {
    rank(match_records(keyword, catalog, field, params))
}

/// Maximum total score a record may have for `keyword` to be accepted.
pub fn tolerated_distance(keyword: &str, tolerance_ratio: f64) -> f64 {
    tolerance_ratio * text::keyword_len(keyword) as f64
}

/// Score every record and keep those within tolerance, in catalog order.
///
/// The result is unranked; see [`rank`].
pub fn match_records(
    keyword: &str,
    catalog: &[BookRecord],
    field: Field,
    params: &SearchParams,
) -> Vec<MatchResult> {
    let query = char_tokens(keyword);
    if query.is_empty() {
        return Vec::new();
    }

    let tolerance = tolerated_distance(keyword, params.tolerance_ratio);

    let accept = |record: &BookRecord| -> Option<MatchResult> {
        let score = score_tokens(&query, record.field(field))? as f64;
        (score <= tolerance).then(|| MatchResult::from_record(record, score))
    };

    let matches = collect_matches(catalog, params.parallel_threshold, &accept);

    debug!(
        keyword,
        %field,
        tolerance,
        scanned = catalog.len(),
        matched = matches.len(),
        "fuzzy match complete"
    );

    matches
}

/// Order results by score (ascending), breaking ties by code (ascending).
pub fn rank(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.code.cmp(&b.code))
    });
    results
}

/// Sum over query tokens of the closest distance to any token of `target`.
///
/// Returns `None` when `target` has no tokens; such a record can never be
/// within tolerance.
fn score_tokens(query: &[Vec<char>], target: &str) -> Option<usize> {
    let target = char_tokens(target);
    if target.is_empty() {
        return None;
    }

    let total = query.iter().fold(0usize, |acc, q| {
        let best = target
            .iter()
            .map(|t| char_distance(q, t))
            .min()
            .unwrap_or(usize::MAX);
        acc.saturating_add(best)
    });
    Some(total)
}

fn char_tokens(text: &str) -> Vec<Vec<char>> {
    text::tokenize(text)
        .iter()
        .map(|t| t.chars().collect())
        .collect()
}

#[cfg(feature = "parallel")]
fn collect_matches<F>(catalog: &[BookRecord], threshold: usize, accept: &F) -> Vec<MatchResult>
where
    F: Fn(&BookRecord) -> Option<MatchResult> + Sync,
{
    if catalog.len() >= threshold {
        use rayon::prelude::*;
        catalog.par_iter().filter_map(accept).collect()
    } else {
        catalog.iter().filter_map(accept).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn collect_matches<F>(catalog: &[BookRecord], _threshold: usize, accept: &F) -> Vec<MatchResult>
where
    F: Fn(&BookRecord) -> Option<MatchResult>,
{
    catalog.iter().filter_map(accept).collect()
}
