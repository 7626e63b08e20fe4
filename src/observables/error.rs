//! Invocation-side error type.
//!
//! [`ObserveError`] is what a single observable invocation can produce:
//! a missing context value, a result of the wrong shape, or an arbitrary
//! failure reported by the callable itself. The registry propagates these
//! unmodified through `update` - no wrapping, suppression, or retry.

use thiserror::Error;

/// Error raised by an observable invoked with the shared update context.
#[derive(Debug, Error)]
pub enum ObserveError {
    /// The callable asked for a positional value the context does not hold.
    #[error("missing positional value at index {0}")]
    MissingPositional(usize),

    /// The callable asked for a named value the context does not hold.
    #[error("missing named value `{0}`")]
    MissingNamed(String),

    /// A context value had the wrong shape for the callable.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The kind the callable asked for.
        expected: &'static str,
        /// The kind the context actually held.
        found: &'static str,
    },

    /// The callable failed on its own terms.
    #[error("{0}")]
    Failed(String),
}

impl ObserveError {
    /// Creates a [`ObserveError::Failed`] from any displayable message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osservabili::observables::ObserveError;
    ///
    /// let err = ObserveError::failed("matrix not positive definite");
    /// assert_eq!(err.to_string(), "matrix not positive definite");
    /// ```
    pub fn failed(message: impl Into<String>) -> Self {
        ObserveError::Failed(message.into())
    }
}
