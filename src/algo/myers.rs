//! Myers Diff Algorithm for token sequences
//!
//! Finds a longest common subsequence between two token sequences and returns
//! it as strictly increasing `(old_idx, new_idx)` match pairs.
//!
//! # Algorithm Choice: Why Myers?
//!
//! | Algorithm | Time | Space | Best for |
//! |-----------|------|-------|----------|
//! | DP | O(n*m) | O(n*m) | Tiny inputs |
//! | **Myers** | O((n+m)*d) | O(d²) | **Revisions of the same document** |
//!
//! Two revisions of a document usually share most of their tokens, so the
//! edit distance `d` is small compared to `n + m`.
//!
//! # Tie-break
//!
//! The pairs are exactly those of the forward walk in [`lcs`]: starting at the
//! front of both sequences, equal items are matched, otherwise the old item is
//! skipped whenever an optimal alignment remains reachable, and only then the
//! new item. Myers' search answers the "is an optimal alignment still
//! reachable" question without the O(n*m) table:
//!
//! 1. The common prefix is matched directly (the walk would match it too).
//! 2. The search runs from the *end* of both sequences and records, per round
//!    `d` and diagonal `k`, how far back a path of at most `d` edits reaches.
//!    Distance to the end never grows along a diagonal towards the end, so one
//!    number per diagonal answers "within `d` edits of the end" for every point.
//! 3. The forward walk consults that table at each divergence.
//!
//! Remainders of at most 8×8 items skip the search and use the DP matcher, which
//! yields the same pairs.
//!
//! # Space
//!
//! Each round keeps only its live `[-d, d]` band, so the table is O(d²)
//! rather than O(d*(n+m)).
//!
//! # References
//!
//! - Myers, E.W. "An O(ND) Difference Algorithm and Its Variations" (1986)

use super::lcs;
use super::Match;

/// Remainders (after the common prefix) at most this long on both sides go to
/// the DP matcher.
const SMALL_SEQUENCE: usize = 8;

/// Diagonal not reachable within the round's edit budget.
const UNREACHED: isize = -1;

// =============================================================================
// Main API
// =============================================================================

/// Compute matching pairs between two sequences using Myers algorithm.
///
/// `max_edit_distance` bounds the search: when the sequences need more edits
/// than that after the common prefix, only the common prefix and suffix are
/// matched and everything between them counts as replaced. `None` searches
/// without a bound.
pub fn match_sequences<T: Eq>(old: &[T], new: &[T], max_edit_distance: Option<usize>) -> Vec<Match> {
    let mut prefix_len = 0;
    while prefix_len < old.len() && prefix_len < new.len() && old[prefix_len] == new[prefix_len] {
        prefix_len += 1;
    }

    let mut matches: Vec<Match> = (0..prefix_len).map(|i| (i, i)).collect();

    let old_rest = &old[prefix_len..];
    let new_rest = &new[prefix_len..];
    if old_rest.is_empty() || new_rest.is_empty() {
        return matches;
    }

    let rest = if old_rest.len() <= SMALL_SEQUENCE && new_rest.len() <= SMALL_SEQUENCE {
        lcs::match_sequences(old_rest, new_rest)
    } else {
        match DistanceTable::build(old_rest, new_rest, max_edit_distance) {
            Some(table) => {
                tracing::trace!(
                    old_rest = old_rest.len(),
                    new_rest = new_rest.len(),
                    distance = table.distance,
                    "myers distance table"
                );
                table.leftmost_matches(old_rest, new_rest)
            }
            None => {
                tracing::debug!(
                    old_rest = old_rest.len(),
                    new_rest = new_rest.len(),
                    limit = ?max_edit_distance,
                    "edit distance limit exceeded, treating middle as replaced"
                );
                common_suffix(old_rest, new_rest)
            }
        }
    };

    matches.extend(rest.into_iter().map(|(oi, ni)| (oi + prefix_len, ni + prefix_len)));
    matches
}

/// Pairs for the common suffix only.
fn common_suffix<T: Eq>(old: &[T], new: &[T]) -> Vec<Match> {
    let (n, m) = (old.len(), new.len());
    let mut suffix_len = 0;
    while suffix_len < n && suffix_len < m && old[n - 1 - suffix_len] == new[m - 1 - suffix_len] {
        suffix_len += 1;
    }
    (0..suffix_len).map(|i| (n - suffix_len + i, m - suffix_len + i)).collect()
}

// =============================================================================
// DistanceTable
// =============================================================================

/// Furthest-reaching points of a Myers search run backwards from the end.
///
/// Coordinates are reversed: `x` counts old items consumed from the back,
/// `y` new items, and diagonal `k = x - y`.
struct DistanceTable {
    old_len: usize,
    new_len: usize,
    /// Edit distance between the two sequences
    distance: usize,
    /// `rounds[d][k + d]`: largest `x` on diagonal `k` within `d` edits
    rounds: Vec<Vec<isize>>,
}

impl DistanceTable {
    /// Run the backward search. `None` if the distance exceeds `limit`.
    fn build<T: Eq>(old: &[T], new: &[T], limit: Option<usize>) -> Option<Self> {
        let n = old.len() as isize;
        let m = new.len() as isize;
        let max_d = old.len() + new.len();
        let offset = max_d as isize + 1;

        // v[k + offset] = furthest x on diagonal k, kept across rounds of the same parity
        let mut v = vec![UNREACHED; 2 * max_d + 3];
        let mut rounds: Vec<Vec<isize>> = Vec::new();

        for d in 0..=max_d {
            if limit.is_some_and(|limit| d > limit) {
                return None;
            }

            let di = d as isize;
            for k in (-di..=di).step_by(2) {
                let kk = (k + offset) as usize;

                let mut x = if d == 0 {
                    0
                } else {
                    v[kk].max(step_onto(k, v[kk - 1], v[kk + 1], n, m))
                };
                if x == UNREACHED {
                    continue;
                }
                let mut y = x - k;

                // Follow the snake towards the front
                while x < n && y < m && old[(n - 1 - x) as usize] == new[(m - 1 - y) as usize] {
                    x += 1;
                    y += 1;
                }

                v[kk] = x;

                if x == n && y == m {
                    return Some(Self {
                        old_len: old.len(),
                        new_len: new.len(),
                        distance: d,
                        rounds,
                    });
                }
            }

            rounds.push(v[(offset - di) as usize..=(offset + di) as usize].to_vec());
        }

        // d = n + m always reaches the front
        None
    }

    /// Whether `old[i..]` and `new[j..]` are at most `d` edits apart.
    fn within(&self, i: usize, j: usize, d: usize) -> bool {
        let x = (self.old_len - i) as isize;
        let k = x - (self.new_len - j) as isize;

        // Distances on a diagonal share its parity
        let d = if k.rem_euclid(2) as usize == d % 2 {
            d
        } else {
            let Some(d) = d.checked_sub(1) else {
                return false;
            };
            d
        };
        if k.unsigned_abs() > d {
            return false;
        }

        let reach = self.rounds[d][(k + d as isize) as usize];
        reach != UNREACHED && x <= reach
    }

    /// Forward walk: match, else skip the old item if that stays optimal, else
    /// skip the new item.
    fn leftmost_matches<T: Eq>(&self, old: &[T], new: &[T]) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut remaining = self.distance;
        let mut i = 0;
        let mut j = 0;

        while i < old.len() && j < new.len() {
            if old[i] == new[j] {
                matches.push((i, j));
                i += 1;
                j += 1;
                continue;
            }

            remaining = remaining.saturating_sub(1);
            if self.within(i + 1, j, remaining) {
                i += 1;
            } else {
                j += 1;
            }
        }

        matches
    }
}

/// Best in-grid point on diagonal `k` one edit away from the previous round.
///
/// A step that would leave the grid is pulled back onto its edge; the point
/// there is at most one edit further from the origin than its neighbour.
fn step_onto(k: isize, from_left: isize, from_above: isize, n: isize, m: isize) -> isize {
    let mut best = UNREACHED;
    if from_left != UNREACHED {
        best = best.max((from_left + 1).min(n));
    }
    if from_above != UNREACHED {
        best = best.max(from_above.min(m + k));
    }

    if best < k.max(0) || best - k > m {
        UNREACHED
    } else {
        best
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(old: &str, new: &str) -> Vec<Match> {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        match_sequences(&old, &new, None)
    }

    fn assert_valid(old: &str, new: &str, matches: &[Match]) {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        for pair in matches.windows(2) {
            assert!(pair[0].0 < pair[1].0 && pair[0].1 < pair[1].1, "pairs must increase");
        }
        for &(o, n) in matches {
            assert_eq!(old[o], new[n]);
        }
    }

    #[test]
    fn test_empty_sequences() {
        assert!(run("", "").is_empty());
        assert!(run("abc", "").is_empty());
        assert!(run("", "abc").is_empty());
    }

    #[test]
    fn test_no_changes() {
        assert_eq!(run("abc", "abc"), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_single_insert() {
        assert_eq!(run("ac", "abc"), vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn test_single_delete() {
        assert_eq!(run("abc", "ac"), vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn test_prefix_optimization() {
        let matches = run("abcdeX", "abcdeY");
        assert_eq!(matches, vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_common_tail() {
        let matches = run("Xabcde", "Yabcde");
        assert_eq!(matches, vec![(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]);
    }

    #[test]
    fn test_classic_paper_example() {
        // ABCABBA -> CBABAC has an LCS of length 4
        let matches = run("ABCABBA", "CBABAC");
        assert_eq!(matches.len(), 4);
        assert_valid("ABCABBA", "CBABAC", &matches);
    }

    #[test]
    fn test_large_middle_uses_myers() {
        let old = "the quick brown fox jumps over the lazy dog";
        let new = "the quick red fox leaps over a lazy cat";
        let matches = run(old, new);
        assert_valid(old, new, &matches);
        let dp = lcs::match_sequences(
            &old.chars().collect::<Vec<_>>(),
            &new.chars().collect::<Vec<_>>(),
        );
        assert_eq!(matches, dp);
    }

    #[test]
    fn test_same_pairs_as_dp_walk() {
        let cases = [
            ("abababababab", "babababababa"),
            ("xabcdefghijy", "xjabcdefghiy"),
            ("aaaaaaaaaaaa", "aaaaa"),
            ("abcdefghijklmn", "nmlkjihgfedcba"),
            ("a b c d e f g h", "a c b d f e h g q"),
            ("qqqqqqqqqqqqab", "abqqqqqqqqqqqq"),
        ];
        for (old, new) in cases {
            let old: Vec<char> = old.chars().collect();
            let new: Vec<char> = new.chars().collect();
            assert_eq!(
                match_sequences(&old, &new, None),
                lcs::match_sequences(&old, &new),
                "{old:?} vs {new:?}"
            );
        }
    }

    #[test]
    fn test_repeated_item_matches_earliest() {
        // Both `j`s could pair up; the walk keeps the earlier one in `new`
        let old: Vec<char> = "xabcdefghijy".chars().collect();
        let new: Vec<char> = "xjabcdefghiy".chars().collect();
        let matches = match_sequences(&old, &new, None);
        assert_eq!(matches.len(), 11);
        assert!(!matches.contains(&(10, 1)));
        assert_eq!(matches[1], (1, 2));
    }

    #[test]
    fn test_within_matches_reachability() {
        let old: Vec<u32> = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let new: Vec<u32> = vec![2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let table = DistanceTable::build(&old, &new, None).unwrap();
        assert_eq!(table.distance, 2);
        assert!(table.within(1, 0, 1));
        assert!(!table.within(0, 1, 1));
        assert!(table.within(10, 10, 0));
    }

    #[test]
    fn test_edit_limit_gives_up_on_middle() {
        let old: Vec<u32> = (0..40).collect();
        let new: Vec<u32> = (0..40).rev().collect();
        assert!(match_sequences(&old, &new, Some(2)).is_empty());
        assert!(!match_sequences(&old, &new, None).is_empty());
    }

    #[test]
    fn test_edit_limit_keeps_prefix_and_suffix() {
        let mut old: Vec<u32> = vec![1, 2];
        old.extend(100..130);
        old.push(3);
        let mut new: Vec<u32> = vec![1, 2];
        new.extend(200..230);
        new.push(3);

        let matches = match_sequences(&old, &new, Some(1));
        assert_eq!(matches, vec![(0, 0), (1, 1), (32, 32)]);
    }

    #[test]
    fn test_deterministic() {
        let a = run("abababababab", "babababababa");
        let b = run("abababababab", "babababababa");
        assert_eq!(a, b);
    }
}
