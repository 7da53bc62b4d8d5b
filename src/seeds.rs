//! Process-lifetime random constants.
//!
//! Generated once on first use and read-only afterwards. Values differ
//! between processes and must never be persisted or compared across them.

use std::sync::LazyLock;

/// Hash contributions of the fixed primitives and slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeds {
    /// Initial state of the string hash.
    pub string: u32,
    /// Hash of `true`.
    pub true_: u32,
    /// Hash of `false`.
    pub false_: u32,
    /// Hash of `null`.
    pub null: u32,
    /// Hash of `undefined`.
    pub undefined: u32,
    /// Marker mixed into every symbol hash; also the shared hash of
    /// untrackable symbols.
    pub symbol: u32,
    /// Marker mixed into every key slot of a composite fold.
    pub key: u32,
}

impl Seeds {
    fn generate() -> Self {
        Self {
            string: rand::random(),
            true_: rand::random(),
            false_: rand::random(),
            null: rand::random(),
            undefined: rand::random(),
            symbol: rand::random(),
            key: rand::random(),
        }
    }
}

static SEEDS: LazyLock<Seeds> = LazyLock::new(Seeds::generate);

/// Returns this process's seeds.
#[must_use]
pub fn seeds() -> &'static Seeds {
    &SEEDS
}
