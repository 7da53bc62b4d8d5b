//! Hasher configuration.

use serde::Deserialize;

/// Runtime capabilities and seeding for a [`CompositeHasher`](crate::CompositeHasher).
///
/// Deserializable so a host can embed it in its own configuration file;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HasherConfig {
    /// Whether unregistered symbols can be tracked by identity.
    ///
    /// When `false`, all unregistered symbols hash to one shared constant,
    /// are left unsorted, and cut a composite's fold short at the first
    /// unregistered symbol key.
    pub supports_weak_symbol_identity: bool,

    /// Seed for the identity-hash PRNG. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl HasherConfig {
    /// Returns a config with symbol identity tracking disabled.
    #[must_use]
    pub const fn without_weak_symbols() -> Self {
        Self {
            supports_weak_symbol_identity: false,
            rng_seed: None,
        }
    }

    /// Sets the PRNG seed.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            supports_weak_symbol_identity: true,
            rng_seed: None,
        }
    }
}
