//! Hash constants
//!
//! These values are part of the identifier format. Changing any of them
//! changes every identifier, so downstream tables stop matching.

// ============================================================================
// DBJ2
// ============================================================================

/// Initial accumulator value
pub const DBJ2_SEED: u32 = 5381;

/// `(h << 5) + h` is `h * 33`
pub const DBJ2_SHIFT: u32 = 5;

// ============================================================================
// FNV-1a (32-bit)
// ============================================================================

/// Offset basis
pub const FNV1A_OFFSET_BASIS: u32 = 2_166_136_261;

/// Prime
pub const FNV1A_PRIME: u32 = 16_777_619;

// ============================================================================
// Preprocessing
// ============================================================================

/// Subtracted from every byte at or above [`CASE_FOLD_FLOOR`]
pub const CASE_FOLD_DELTA: u8 = 0x20;

/// Lowest byte that gets folded (`b'a'`)
///
/// Everything from here up is folded, not just `a..=z`: `{ | } ~`, DEL and
/// all bytes `>= 0x80` are shifted down too. Identifier tables built
/// elsewhere rely on this exact behavior.
pub const CASE_FOLD_FLOOR: u8 = b'a';

// ============================================================================
// Algorithm Names
// ============================================================================

/// Name accepted for [`HashAlgorithm::Dbj2`](crate::HashAlgorithm::Dbj2)
pub const DBJ2_NAME: &str = "dbj2";

/// Name accepted for [`HashAlgorithm::Fnv1a`](crate::HashAlgorithm::Fnv1a)
pub const FNV1A_NAME: &str = "fnv1a";
