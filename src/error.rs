//! Contract-violation errors.
//!
//! Every variant means a collaborator broke the lazy-registration protocol
//! or handed over a value the hasher cannot read. None of them is retryable.

use std::fmt;

use thiserror::Error;

use crate::value::Identity;

/// Observed state of an identity in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// No entry.
    Absent,
    /// Registered, hash not yet computed.
    Pending,
    /// Hash computed and cached.
    Finalized,
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Absent => "absent",
            Self::Pending => "pending",
            Self::Finalized => "finalized",
        })
    }
}

/// Errors raised by the identity cache and the composite hasher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// The identity already has a cache entry.
    #[error("{0} is already registered")]
    AlreadyRegistered(Identity),

    /// The identity is not in the state the operation requires.
    #[error("{identity} is {actual}, expected {expected}")]
    InvalidState {
        /// Identity the operation was applied to.
        identity: Identity,
        /// State the operation requires.
        expected: EntryState,
        /// State actually found.
        actual: EntryState,
    },

    /// A value kind outside the recognized set.
    #[error("unsupported value kind: {0}")]
    UnsupportedValueKind(String),

    /// The identity names no live slot of the heap: it was rolled back or
    /// never allocated.
    #[error("{0} does not name a live slot")]
    DanglingIdentity(Identity),

    /// The identity was used as a composite but is not one.
    #[error("{0} is not a composite")]
    NotAComposite(Identity),

    /// The composite was reached again while its own fold was running.
    #[error("{0} refers back to itself before its hash was finalized")]
    CyclicComposite(Identity),
}

/// Result alias for hashing operations.
pub type Result<T, E = HashError> = std::result::Result<T, E>;
