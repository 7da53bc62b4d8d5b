//! Primitive hashing — numbers, strings, fixed constants, registry symbols.
//!
//! Identity-hashed values (objects, functions, unregistered symbols) need
//! the cache and live in [`hasher`](crate::hasher).

use crate::seeds::seeds;

/// Hashes a number under value equality.
///
/// `-0` hashes as `0` and every NaN payload as the canonical NaN; the two
/// 32-bit halves of the IEEE-754 pattern are then XOR-folded.
#[must_use]
pub fn number_hash(n: f64) -> u32 {
    let canonical = if n == 0.0 {
        0.0
    } else if n.is_nan() {
        f64::NAN
    } else {
        n
    };
    let bits = canonical.to_bits();
    #[allow(clippy::cast_possible_truncation)]
    let (lo, hi) = (bits as u32, (bits >> 32) as u32);
    lo ^ hi
}

/// Hashes an integer as its nearest `f64`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bigint_hash(n: i128) -> u32 {
    number_hash(n as f64)
}

/// Seeded multiplicative rolling hash over UTF-16 code units.
///
/// `h₀ = seed`, `hᵢ₊₁ = hᵢ·33 ⊕ cᵢ` (wrapping). The empty string hashes to
/// the seed.
#[must_use]
pub fn string_hash(s: &str) -> u32 {
    s.encode_utf16()
        .fold(seeds().string, |h, c| h.wrapping_mul(33) ^ u32::from(c))
}

/// Hashes a symbol that carries a global registry key.
///
/// Distinct identities with the same key hash identically.
#[must_use]
pub fn registered_symbol_hash(key: &str) -> u32 {
    string_hash(key) ^ seeds().symbol
}

/// Shared hash of symbols that cannot be tracked by identity.
#[must_use]
pub fn untracked_symbol_hash() -> u32 {
    seeds().symbol
}

/// Hash of a boolean.
#[must_use]
pub fn bool_hash(b: bool) -> u32 {
    if b { seeds().true_ } else { seeds().false_ }
}

/// Hash of `null`.
#[must_use]
pub fn null_hash() -> u32 {
    seeds().null
}

/// Hash of `undefined`.
#[must_use]
pub fn undefined_hash() -> u32 {
    seeds().undefined
}

/// Marker mixed into every key slot.
#[must_use]
pub fn key_slot() -> u32 {
    seeds().key
}
