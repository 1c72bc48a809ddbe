//! Canonical fingerprints for configuration comparison.
//!
//! ## Float Normalization
//!
//! Floats are quantized to integers before hashing so that `0.1 + 0.2` and
//! `0.3` fingerprint identically. The quantization factor is 1e6 (multiply by
//! 1,000,000 and round to i64). Words are fed to xxh64 in little-endian order.

use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh64::Xxh64;

/// Quantization factor for float normalization.
pub const FLOAT_QUANTIZATION_FACTOR: f64 = 1_000_000.0;

/// Quantize a float to an i64 for deterministic hashing.
pub fn quantize_float(value: f64) -> i64 {
    (value * FLOAT_QUANTIZATION_FACTOR).round() as i64
}

/// A 64-bit canonical fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Fingerprint a sequence of quantized words.
    pub fn of_quantized(words: &[i64]) -> Self {
        let mut hasher = Xxh64::new(0);
        for word in words {
            hasher.update(&word.to_le_bytes());
        }
        Self(hasher.digest())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
