//! Lazy structural hashing for immutable composite values.
//!
//! A *composite* is a record/tuple-like aggregate whose equality is defined
//! by the contents of its own properties rather than by reference identity.
//! This crate computes a 32-bit hash that agrees for structurally equal
//! composites, is computed at most once per composite, and is cached by
//! identity.
//!
//! # Key properties
//!
//! - **Lazy**: composites are registered `Pending` before they are hashed;
//!   [`CompositeHasher::maybe_hash`] probes without forcing computation
//! - **Cache-stable**: the first [`hash`](CompositeHasher::hash) finalizes
//!   the entry; later calls are O(1)
//! - **Order-independent**: keys are folded with XOR in a canonical order
//! - **Best-effort**: collisions are tolerated; callers still compare
//!   structurally after a hash match
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! Seeds are random per process; hashes are never meaningful across
//! processes.
//!
//! # Example
//!
//! ```
//! use composite_hash::{Composite, CompositeHasher, Heap};
//!
//! let mut heap = Heap::new();
//! let mut hasher = CompositeHasher::new();
//!
//! let a = hasher
//!     .alloc_composite(&mut heap, [("b", 1), ("a", 2)].into_iter().collect())
//!     .unwrap();
//! let b = hasher
//!     .alloc_composite(&mut heap, [("a", 2), ("b", 1)].into_iter().collect::<Composite>())
//!     .unwrap();
//!
//! assert_eq!(hasher.maybe_hash(a), None);
//! assert_eq!(hasher.hash(&heap, a), hasher.hash(&heap, b));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod canonical;
pub mod config;
pub mod error;
pub mod primitive;
pub mod seeds;
pub mod store;
pub mod value;

mod arena;
mod arena_sync;
mod hasher;
mod hasher_sync;

#[cfg(test)]
mod tests;

pub use arena::Heap;
pub use arena_sync::HeapSync;
pub use config::HasherConfig;
pub use error::{EntryState, HashError};
pub use hasher::CompositeHasher;
pub use hasher_sync::CompositeHasherSync;
pub use store::HeapStore;
pub use value::{Composite, Identity, Object, ObjectId, PropertyKey, Symbol, SymbolId, Value};
