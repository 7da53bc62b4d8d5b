//! Canonical key order over a composite's own properties.
//!
//! Order:
//!
//! 1. string keys, by Unicode scalar order;
//! 2. registry symbols, by registry key;
//! 3. unregistered symbols, by incidental discovery order.
//!
//! Without weak symbol identity, unregistered symbols keep creator order and
//! the hashable prefix ends at the first of them.

use crate::cache::SymbolOrder;
use crate::error::{HashError, Result};
use crate::store::HeapStore;
use crate::value::{Identity, PropertyKey, Value};

/// Sort key of one property. Variant order is the canonical class order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank<'a> {
    String(&'a str),
    Registered(&'a str),
    /// `None` when discovery order is unavailable; all such keys tie.
    Unregistered(Option<u64>),
}

/// Property indices of a composite in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalKeys {
    order: Vec<usize>,
    cutoff: usize,
}

impl CanonicalKeys {
    /// All property indices in canonical order.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The prefix of [`order`](Self::order) that takes part in the hash.
    #[must_use]
    pub fn hashable(&self) -> &[usize] {
        &self.order[..self.cutoff]
    }

    /// Returns `true` if some keys are excluded from the hash.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.cutoff < self.order.len()
    }
}

/// Orders `properties` canonically.
///
/// Unregistered symbols are assigned their discovery order in creator
/// order before sorting, so first sight is deterministic for a given
/// composite. String keys compare by Unicode scalar order (`str::cmp`),
/// not by any locale collation.
///
/// # Errors
///
/// [`HashError::DanglingIdentity`] if a symbol key names no live slot of
/// `store`.
pub fn canonicalize<S: HeapStore + ?Sized>(
    store: &S,
    properties: &[(PropertyKey, Value)],
    symbols: &mut SymbolOrder,
    weak_symbols: bool,
) -> Result<CanonicalKeys> {
    let mut ranked: Vec<(Rank<'_>, usize)> = Vec::with_capacity(properties.len());
    for (i, (key, _)) in properties.iter().enumerate() {
        let rank = match key {
            PropertyKey::String(s) => Rank::String(s),
            PropertyKey::Symbol(id) => {
                let symbol = store
                    .try_symbol(*id)
                    .ok_or(HashError::DanglingIdentity(Identity::Symbol(*id)))?;
                match symbol.registry_key.as_deref() {
                    Some(reg) => Rank::Registered(reg),
                    None => Rank::Unregistered(weak_symbols.then(|| symbols.order_of(*id))),
                }
            }
        };
        ranked.push((rank, i));
    }

    // Index breaks ties, which keeps creator order among tied keys.
    ranked.sort_unstable();

    let cutoff = if weak_symbols {
        ranked.len()
    } else {
        ranked
            .iter()
            .position(|(rank, _)| matches!(rank, Rank::Unregistered(_)))
            .unwrap_or(ranked.len())
    };

    Ok(CanonicalKeys {
        order: ranked.into_iter().map(|(_, i)| i).collect(),
        cutoff,
    })
}
