//! Longest Common Subsequence (LCS) Algorithm
//!
//! Classic dynamic-programming LCS over two sequences.
//!
//! # Tie-break
//!
//! The table holds LCS lengths of *suffixes*, so the extraction walk runs
//! forward. At each step equal items are matched immediately, which is always
//! optimal, and otherwise the walk skips the old item whenever that keeps the
//! LCS length. This yields the leftmost alignment with deletions ahead of
//! insertions.
//!
//! # Complexity
//!
//! - Time: O(n * m)
//! - Space: O(n * m) for the length table

use super::Match;

/// Compute LCS match pairs using dynamic programming.
///
/// Returns strictly increasing `(old_idx, new_idx)` pairs.
pub fn match_sequences<T: Eq>(old: &[T], new: &[T]) -> Vec<Match> {
    let n = old.len();
    let m = new.len();

    if n == 0 || m == 0 {
        return Vec::new();
    }

    // suffix[i * width + j] = LCS length of old[i..] and new[j..]
    let width = m + 1;
    let mut suffix = vec![0u32; (n + 1) * width];

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            suffix[i * width + j] = if old[i] == new[j] {
                suffix[(i + 1) * width + j + 1] + 1
            } else {
                suffix[(i + 1) * width + j].max(suffix[i * width + j + 1])
            };
        }
    }

    let mut matches = Vec::with_capacity(suffix[0] as usize);
    let mut i = 0;
    let mut j = 0;

    while i < n && j < m {
        if old[i] == new[j] {
            matches.push((i, j));
            i += 1;
            j += 1;
        } else if suffix[(i + 1) * width + j] >= suffix[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }

    matches
}
