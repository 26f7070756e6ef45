//! Aligner
//!
//! Turns two token sequences into an ordered stream of [`Op`]s.
//!
//! # Pipeline
//!
//! ```text
//! tokens A, tokens B
//!       |  intern (FxHashMap<&str, u32>)
//!       v
//! ids A, ids B  --matcher-->  (a_idx, b_idx) pairs  --emit-->  Vec<Op>
//! ```
//!
//! # Emission order
//!
//! The stream is a synchronized left-to-right scan. Between two matched
//! tokens, the unmatched run of A is emitted as `Delete`s and is immediately
//! followed by the unmatched run of B as `Insert`s; the matched token is then
//! emitted as `Equal`.
//!
//! # Guarantees
//!
//! - `Equal ∪ Delete` tokens, in order, are exactly sequence A.
//! - `Equal ∪ Insert` tokens, in order, are exactly sequence B.
//! - Identical inputs always produce the identical stream.

use rustc_hash::FxHashMap;

use crate::algo::{lcs, myers, Match};
use crate::token::Token;

// =============================================================================
// Public Types
// =============================================================================

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The original document.
    A,
    /// The revised document.
    B,
}

/// Alignment operation for a single token.
///
/// Only these three variants exist: guidance markers that some line-diff tools
/// interleave with their output carry no token and have no representation here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op<'a> {
    /// Token present, unchanged, in both sequences
    Equal(Token<'a>),
    /// Token present only in sequence A
    Delete(Token<'a>),
    /// Token present only in sequence B
    Insert(Token<'a>),
}

impl<'a> Op<'a> {
    /// The token carried by this operation.
    pub fn token(&self) -> Token<'a> {
        match *self {
            Self::Equal(t) | Self::Delete(t) | Self::Insert(t) => t,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }

    /// Whether this operation's token exists in the given side's document.
    pub fn belongs_to(&self, side: Side) -> bool {
        match side {
            Side::A => !self.is_insert(),
            Side::B => !self.is_delete(),
        }
    }
}

/// Ordered operations produced by the aligner.
pub type OpStream<'a> = Vec<Op<'a>>;

/// Matching algorithm used by the aligner.
///
/// Both produce the same operation stream: the leftmost alignment, where a
/// scan from the front matches the earliest common token it can and deletes
/// before it inserts. They differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignAlgorithm {
    /// Myers O((n+m)*d) search; memory grows with the edit distance.
    #[default]
    Myers,
    /// Classic O(n*m) dynamic-programming LCS.
    Lcs,
}

/// Configuration for the aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignConfig {
    /// Matching algorithm.
    /// Default: Myers
    pub algorithm: AlignAlgorithm,
    /// Edit distance after which Myers stops searching and reports everything
    /// between the common prefix and suffix as replaced. Ignored by `Lcs`.
    /// Default: unbounded
    pub max_edit_distance: Option<usize>,
}

impl AlignConfig {
    /// Unbounded Myers alignment.
    pub const DEFAULT: Self = Self {
        algorithm: AlignAlgorithm::Myers,
        max_edit_distance: None,
    };

    /// Create config with the given algorithm and no edit limit.
    pub fn new(algorithm: AlignAlgorithm) -> Self {
        Self {
            algorithm,
            max_edit_distance: None,
        }
    }

    /// Myers alignment that gives up after `limit` edits.
    ///
    /// Useful for very large, very different inputs where the full search
    /// would be slow and the result unreadable anyway.
    pub fn bounded(limit: usize) -> Self {
        Self {
            algorithm: AlignAlgorithm::Myers,
            max_edit_distance: Some(limit),
        }
    }

    pub fn with_algorithm(mut self, algorithm: AlignAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_edit_distance(mut self, limit: Option<usize>) -> Self {
        self.max_edit_distance = limit;
        self
    }
}

/// Token counts of an alignment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlignStats {
    /// Tokens common to both sides
    pub equal: usize,
    /// Tokens only in A
    pub deleted: usize,
    /// Tokens only in B
    pub inserted: usize,
}

impl AlignStats {
    /// Number of non-equal operations.
    pub fn edit_count(&self) -> usize {
        self.deleted + self.inserted
    }

    /// Check if the two sides are token-for-token identical.
    pub fn is_identical(&self) -> bool {
        self.edit_count() == 0
    }

    /// Similarity ratio `2 * equal / (|A| + |B|)` in `[0.0, 1.0]`.
    ///
    /// Two empty documents are fully similar.
    pub fn similarity(&self) -> f64 {
        let total = 2 * self.equal + self.deleted + self.inserted;
        if total == 0 {
            1.0
        } else {
            (2 * self.equal) as f64 / total as f64
        }
    }
}

/// Result of aligning two token sequences.
#[derive(Debug, Default, Clone, PartialEq)]
#[must_use]
pub struct Alignment<'a> {
    /// Operations in scan order
    pub ops: OpStream<'a>,
    /// Counts per operation kind
    pub stats: AlignStats,
}

impl<'a> Alignment<'a> {
    /// Tokens of one side's document, in order.
    pub fn tokens(&self, side: Side) -> impl Iterator<Item = Token<'a>> + '_ {
        self.ops.iter().filter(move |op| op.belongs_to(side)).map(Op::token)
    }

    pub fn into_ops(self) -> OpStream<'a> {
        self.ops
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Align two token sequences with the default configuration.
pub fn align<'a>(old: &[Token<'a>], new: &[Token<'a>]) -> Alignment<'a> {
    align_with_config(old, new, &AlignConfig::DEFAULT)
}

/// Align two token sequences.
pub fn align_with_config<'a>(old: &[Token<'a>], new: &[Token<'a>], config: &AlignConfig) -> Alignment<'a> {
    // Quick paths
    if old.is_empty() || new.is_empty() || old == new {
        let matches: Vec<Match> = if old == new {
            (0..old.len()).map(|i| (i, i)).collect()
        } else {
            Vec::new()
        };
        return emit(old, new, &matches);
    }

    let (old_ids, new_ids) = intern(old, new);

    let matches = match config.algorithm {
        AlignAlgorithm::Myers => myers::match_sequences(&old_ids, &new_ids, config.max_edit_distance),
        AlignAlgorithm::Lcs => lcs::match_sequences(&old_ids, &new_ids),
    };

    let alignment = emit(old, new, &matches);
    tracing::debug!(
        algorithm = ?config.algorithm,
        old_tokens = old.len(),
        new_tokens = new.len(),
        equal = alignment.stats.equal,
        deleted = alignment.stats.deleted,
        inserted = alignment.stats.inserted,
        "aligned token sequences"
    );
    alignment
}

// =============================================================================
// Internals
// =============================================================================

/// Map each distinct token text to a small integer id.
///
/// Ids are assigned in first-seen order, A before B, so interning is
/// deterministic.
fn intern<'a>(old: &[Token<'a>], new: &[Token<'a>]) -> (Vec<u32>, Vec<u32>) {
    let mut table: FxHashMap<&'a str, u32> = FxHashMap::default();

    let mut ids = |tokens: &[Token<'a>]| -> Vec<u32> {
        tokens
            .iter()
            .map(|token| {
                let next = table.len() as u32;
                *table.entry(token.text()).or_insert(next)
            })
            .collect()
    };

    let old_ids = ids(old);
    let new_ids = ids(new);
    (old_ids, new_ids)
}

/// Build the operation stream from match pairs.
fn emit<'a>(old: &[Token<'a>], new: &[Token<'a>], matches: &[Match]) -> Alignment<'a> {
    let mut ops = Vec::with_capacity(old.len() + new.len() - matches.len());
    let mut stats = AlignStats::default();
    let mut i = 0;
    let mut j = 0;

    for &(oi, ni) in matches {
        push_gap(&mut ops, &mut stats, &old[i..oi], &new[j..ni]);
        ops.push(Op::Equal(old[oi]));
        stats.equal += 1;
        i = oi + 1;
        j = ni + 1;
    }
    push_gap(&mut ops, &mut stats, &old[i..], &new[j..]);

    Alignment { ops, stats }
}

/// Deletions first, then insertions.
fn push_gap<'a>(ops: &mut OpStream<'a>, stats: &mut AlignStats, deleted: &[Token<'a>], inserted: &[Token<'a>]) {
    ops.extend(deleted.iter().copied().map(Op::Delete));
    ops.extend(inserted.iter().copied().map(Op::Insert));
    stats.deleted += deleted.len();
    stats.inserted += inserted.len();
}

// =============================================================================
// Tests
// =============================================================================
