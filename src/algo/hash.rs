//! Deterministic hashing for comparison inputs
//!
//! Report fingerprints must not change between runs or machines, so they are
//! computed with blake3 rather than `std::hash`.

/// A deterministic hasher using blake3.
///
/// Every field is written with a length prefix, so `("ab", "c")` and
/// `("a", "bc")` hash differently.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update with a length-prefixed byte field.
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(&(data.len() as u64).to_le_bytes());
        self.inner.update(data);
        self
    }

    /// Update with a length-prefixed string field.
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update(s.as_bytes())
    }

    /// Finish and return the full digest as lowercase hex.
    #[inline]
    pub fn finish_hex(self) -> String {
        self.inner.finalize().to_hex().to_string()
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}
