//! Stable merge sort over a chosen record field.
//!
//! Records are ordered by the lowercased value of the field. Equal keys keep
//! their input order. The input slice is never touched; a new `Vec` is
//! returned.
//!
//! # Algorithm
//!
//! 1. Lowercase the sort field of every record once.
//! 2. Treat every index as a sorted run of length 1.
//! 3. Merge adjacent runs pairwise, doubling the run width each pass,
//!    until one run covers the whole catalog. On equal keys the left run
//!    wins, which keeps the sort stable.
//! 4. Materialize the records in the final index order.
//!
//! The passes are iterative, so call depth is constant regardless of
//! catalog size. Each pass writes into a second index buffer (`O(n)`
//! auxiliary space per pass, `O(n log n)` comparisons overall).

use tracing::trace;

use crate::models::{BookRecord, Field};
use crate::text;

/// Return `catalog` ordered by `field`, case-insensitively and stably.
pub fn sort(catalog: &[BookRecord], field: Field) -> Vec<BookRecord> {
    let keys: Vec<String> = catalog
        .iter()
        .map(|r| text::normalize(r.field(field)))
        .collect();

    let order = merge_sort_indices(&keys);
    trace!(records = catalog.len(), %field, "catalog sorted");

    order.into_iter().map(|i| catalog[i].clone()).collect()
}

/// Stable bottom-up merge sort of `keys`, returned as a permutation of indices.
pub fn merge_sort_indices<K: Ord>(keys: &[K]) -> Vec<usize> {
    let n = keys.len();
    let mut src: Vec<usize> = (0..n).collect();
    if n <= 1 {
        return src;
    }

    let mut dst: Vec<usize> = Vec::with_capacity(n);
    let mut width = 1;
    while width < n {
        dst.clear();
        let mut start = 0;
        while start < n {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            merge(keys, &src[start..mid], &src[mid..end], &mut dst);
            start = end;
        }
        std::mem::swap(&mut src, &mut dst);
        width *= 2;
    }

    src
}

fn merge<K: Ord>(keys: &[K], left: &[usize], right: &[usize], out: &mut Vec<usize>) {
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if keys[left[i]] <= keys[right[j]] {
            out.push(left[i]);
            i += 1;
        } else {
            out.push(right[j]);
            j += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
}
