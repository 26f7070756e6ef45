//! Sequence matching algorithms.
//!
//! - `myers`: Myers diff algorithm (default matcher)
//! - `lcs`: classic dynamic-programming LCS
//! - `hash`: stable hashing utilities
//!
//! Both matchers return the same shape: strictly increasing
//! `(old_idx, new_idx)` pairs of equal items.

mod hash;
pub mod lcs;
pub mod myers;

pub use hash::StableHasher;

/// A matched pair: index into the old sequence, index into the new one.
pub type Match = (usize, usize);
