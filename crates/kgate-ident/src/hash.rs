//! String hashing
//!
//! Both algorithms share the same preprocessing:
//!
//! 1. Zero bytes are skipped. They do not terminate the input.
//! 2. Bytes `>= b'a'` have `0x20` subtracted, so `ntdll` and `NTDLL` hash
//!    alike.
//!
//! Arithmetic is 32-bit with wraparound. Neither hash is meant to resist
//! deliberate collisions.
//!
//! The functions are `const`, so identifiers can be computed at compile time:
//!
//! ```
//! use kgate_ident::dbj2;
//!
//! const NT_CLOSE: u32 = dbj2(b"NtClose");
//! assert_eq!(NT_CLOSE, dbj2(b"NTCLOSE"));
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CASE_FOLD_DELTA, CASE_FOLD_FLOOR, DBJ2_NAME, DBJ2_SEED, DBJ2_SHIFT, FNV1A_NAME,
    FNV1A_OFFSET_BASIS, FNV1A_PRIME,
};
use crate::error::UnknownAlgorithm;

// ============================================================================
// Algorithms
// ============================================================================

#[inline(always)]
const fn fold(byte: u8) -> u8 {
    if byte >= CASE_FOLD_FLOOR {
        byte - CASE_FOLD_DELTA
    } else {
        byte
    }
}

/// DBJ2: `h = (h << 5) + h + byte`, seeded with 5381.
pub const fn dbj2(bytes: &[u8]) -> u32 {
    let mut hash = DBJ2_SEED;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        i += 1;
        if byte == 0 {
            continue;
        }
        hash = (hash << DBJ2_SHIFT)
            .wrapping_add(hash)
            .wrapping_add(fold(byte) as u32);
    }
    hash
}

/// FNV-1a (32-bit): `h = (h ^ byte) * prime`, seeded with the offset basis.
pub const fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV1A_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        i += 1;
        if byte == 0 {
            continue;
        }
        hash ^= fold(byte) as u32;
        hash = hash.wrapping_mul(FNV1A_PRIME);
    }
    hash
}

// ============================================================================
// Algorithm Selection
// ============================================================================

/// Selectable hash algorithm.
///
/// Serializes as `"dbj2"` / `"fnv1a"`, so it can sit in a caller's config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// DBJ2, used by the resolver cache
    #[default]
    Dbj2,
    /// FNV-1a, opt-in
    Fnv1a,
}

impl HashAlgorithm {
    /// Look up an algorithm by name. Unknown names fall back to DBJ2.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Canonical name
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Dbj2 => DBJ2_NAME,
            HashAlgorithm::Fnv1a => FNV1A_NAME,
        }
    }

    /// Hash `bytes` with this algorithm
    pub const fn hash(self, bytes: &[u8]) -> u32 {
        match self {
            HashAlgorithm::Dbj2 => dbj2(bytes),
            HashAlgorithm::Fnv1a => fnv1a(bytes),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            DBJ2_NAME => Ok(HashAlgorithm::Dbj2),
            FNV1A_NAME => Ok(HashAlgorithm::Fnv1a),
            _ => Err(UnknownAlgorithm::new(name)),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Kani Proofs
// ============================================================================

#[cfg(kani)]
mod proofs {
    use super::*;

    /// Proof: inserting a zero byte anywhere never changes either hash
    #[kani::proof]
    fn zero_byte_is_elided() {
        let bytes: [u8; 4] = kani::any();
        let at: usize = kani::any();
        kani::assume(at <= bytes.len());

        let mut padded = [0u8; 5];
        padded[..at].copy_from_slice(&bytes[..at]);
        padded[at + 1..].copy_from_slice(&bytes[at..]);

        assert_eq!(dbj2(&padded), dbj2(&bytes));
        assert_eq!(fnv1a(&padded), fnv1a(&bytes));
    }

    /// Proof: ASCII letters hash the same in either case
    #[kani::proof]
    fn ascii_case_is_folded() {
        let byte: u8 = kani::any();
        kani::assume(byte.is_ascii_alphabetic());

        let upper = [byte.to_ascii_uppercase()];
        let lower = [byte.to_ascii_lowercase()];
        assert_eq!(dbj2(&upper), dbj2(&lower));
        assert_eq!(fnv1a(&upper), fnv1a(&lower));
    }
}

// ============================================================================
// Tests
// ============================================================================
