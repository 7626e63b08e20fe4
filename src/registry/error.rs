//! Error type for registry construction, lookup, and update operations.
//!
//! # Example
//!
//! ```rust
//! use osservabili::registry::{Registry, RegistryError};
//!
//! let registry = Registry::new();
//! match registry.get("loss") {
//!     Err(RegistryError::NotFound(id)) => assert_eq!(id, "loss"),
//!     other => panic!("unexpected: {:?}", other.map(|_| ())),
//! }
//! ```

use thiserror::Error;

use crate::observables::ObserveError;

/// Error raised by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two entries would share one identifier.
    ///
    /// Raised at construction time (`from_pairs`, `from_observables`,
    /// `from_snapshot`); `set` deliberately keeps insert-or-replace
    /// semantics instead.
    #[error("duplicate identifier `{0}`")]
    DuplicateIdentifier(String),

    /// A lookup referenced an identifier that is not registered.
    #[error("no observable registered under `{0}`")]
    NotFound(String),

    /// A lookup referenced a callable that is not registered.
    #[error("callable is not registered")]
    UnregisteredCallable,

    /// `update` reached an entry with no callable attached.
    ///
    /// Only registries reconstructed from a snapshot contain such entries;
    /// they support result inspection but not updates.
    #[error("observable `{0}` has no callable attached")]
    Detached(String),

    /// An observable invocation failed during `update`.
    ///
    /// Transparent: the underlying [`ObserveError`] propagates to the
    /// `update` caller unmodified.
    #[error(transparent)]
    Observe(#[from] ObserveError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
