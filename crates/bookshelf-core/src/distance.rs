//! Levenshtein edit distance.
//!
//! Bottom-up dynamic programming over a `(len(b) + 1) × (len(a) + 1)` table
//! with unit costs for insertion, deletion, and substitution. Strings are
//! compared by Unicode scalar value, not by byte.
//!
//! The table is allocated per call and nothing recurses, so long inputs
//! cost memory proportional to the product of their lengths and never
//! depend on stack depth. Concurrent callers share no state.

/// Edit distance between `a` and `b`.
///
/// ```rust
/// use bookshelf_core::distance;
///
/// assert_eq!(distance("kitten", "sitting"), 3);
/// assert_eq!(distance("", "abc"), 3);
/// ```
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    char_distance(&a, &b)
}

/// Edit distance over pre-split character slices.
///
/// Used by the matcher so each token is decoded once per query rather than
/// once per comparison.
pub fn char_distance(a: &[char], b: &[char]) -> usize {
    let cols = a.len() + 1;
    let rows = b.len() + 1;

    // table[i][j]: distance between b[..i] and a[..j]
    let mut table = vec![vec![0usize; cols]; rows];
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }

    for i in 1..rows {
        for j in 1..cols {
            table[i][j] = if a[j - 1] == b[i - 1] {
                table[i - 1][j - 1]
            } else {
                1 + table[i - 1][j].min(table[i][j - 1]).min(table[i - 1][j - 1])
            };
        }
    }

    table[rows - 1][cols - 1]
}
