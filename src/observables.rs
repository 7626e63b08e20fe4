//! Observable callables, result values, and the shared invocation context.
//!
//! An *observable* is anything implementing the single-call contract of the
//! [`Observable`] trait: given a shared [`Context`], produce one [`Value`] or
//! fail with an [`ObserveError`]. A blanket implementation covers plain
//! closures, so in practice observables are built from closures, either bare
//! (anonymous) or wrapped in [`Named`] to carry an inherent identifier.
//!
//! Observables are stored and passed around as [`SharedObservable`]
//! (`Arc<dyn Observable>`), which gives the registry shared ownership and
//! makes lookup-by-callable an identity test on the allocation.
//!
//! # Examples
//!
//! ```rust
//! use osservabili::observables::{named, observable, Context, Value};
//!
//! // Named observable: carries its identifier.
//! let loss = named("loss", |cx: &Context| {
//!     let x = cx.require_arg(0)?.expect_f64()?;
//!     Ok(Value::from((x - 3.0) * (x - 3.0)))
//! });
//! assert_eq!(loss.name(), Some("loss"));
//!
//! // Anonymous observable: identifier derived at registration.
//! let anon = observable(|cx: &Context| Ok(Value::from(cx.args().len() as i64)));
//! assert_eq!(anon.name(), None);
//! ```

pub mod context;
pub mod value;

mod error;
mod named;

pub use context::Context;
pub use error::ObserveError;
pub use named::{derive_identifier, Named};
pub use value::Value;

use std::sync::Arc;

/// Result type returned by a single observable invocation.
pub type ObserveResult = Result<Value, ObserveError>;

/// The single-call contract every observable satisfies.
///
/// No inheritance hierarchy is involved: a closure, a [`Named`] wrapper, or
/// any hand-written type with one `observe` method all qualify. The trait is
/// `Send + Sync` so a registry can be moved across threads under external
/// synchronization; the crate itself never invokes observables concurrently.
pub trait Observable: Send + Sync {
    /// Invokes the observable against the shared invocation context.
    ///
    /// The context is a bag: observables read only the positional and named
    /// values they ask for, and unused values are simply ignored. Asking for
    /// an absent value (via the `require*` accessors of [`Context`]) is the
    /// canonical invocation failure.
    fn observe(&self, cx: &Context) -> ObserveResult;

    /// The inherent name of this observable, if it carries one.
    ///
    /// Anonymous observables return `None` and receive a per-process
    /// placeholder token when an identifier is derived for them; see
    /// [`derive_identifier`].
    fn name(&self) -> Option<&str> {
        None
    }
}

impl<F> Observable for F
where
    F: Fn(&Context) -> ObserveResult + Send + Sync,
{
    fn observe(&self, cx: &Context) -> ObserveResult {
        self(cx)
    }
}

/// Shared-ownership handle to an observable.
///
/// The registry clones this handle rather than the callable itself;
/// [`crate::registry::Registry::log_of`] identifies a callable by
/// `Arc::ptr_eq` on the handle, so lookups by callable require passing a
/// clone of the handle that was originally registered.
pub type SharedObservable = Arc<dyn Observable>;

/// Wraps a closure into an anonymous [`SharedObservable`].
///
/// # Examples
///
/// ```rust
/// use osservabili::observables::{observable, Context, Value};
///
/// let count = observable(|cx: &Context| Ok(Value::from(cx.args().len() as i64)));
/// assert!(count.name().is_none());
/// ```
pub fn observable<F>(f: F) -> SharedObservable
where
    F: Fn(&Context) -> ObserveResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a closure into a [`SharedObservable`] carrying an inherent name.
///
/// Shorthand for `Arc::new(Named::new(name, f))`.
///
/// # Examples
///
/// ```rust
/// use osservabili::observables::{named, Context, Value};
///
/// let sq = named("sq", |cx: &Context| {
///     let x = cx.require_arg(0)?.expect_i64()?;
///     Ok(Value::from(x * x))
/// });
/// assert_eq!(sq.name(), Some("sq"));
/// ```
pub fn named<F>(name: impl Into<String>, f: F) -> SharedObservable
where
    F: Fn(&Context) -> ObserveResult + Send + Sync + 'static,
{
    Arc::new(Named::new(name, f))
}
