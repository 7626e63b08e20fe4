//! Naming adapter and identifier derivation.
//!
//! [`Named`] decorates a callable with an inherent identifier while keeping
//! the [`Observable`] contract intact. [`derive_identifier`] turns any
//! observable handle into the identifier the registry will file it under:
//! the inherent name when there is one, otherwise a per-process placeholder
//! token (`#1`, `#2`, ...).
//!
//! Placeholder tokens are cosmetic, not collision-proof across sessions.
//! Callers who need stable, meaningful names must register observables with
//! explicit identifiers; that responsibility is the caller's, not the
//! registry's.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use super::context::Context;
use super::{Observable, ObserveResult, SharedObservable};

/// Global counter for placeholder tokens handed to anonymous observables.
///
/// Incremented atomically once per anonymous callable; `Relaxed` suffices
/// because only atomicity matters, not ordering against other memory.
static NEXT_TOKEN: AtomicUsize = AtomicUsize::new(1);

fn next_token() -> String {
    format!("#{}", NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
}

/// Tokens already assigned, keyed by the callable's allocation address.
///
/// Keeps derivation stable: deriving twice for the same live handle returns
/// the same token. Entries are never evicted; the map grows by one small
/// string per anonymous callable, which matches the crate's accepted
/// unbounded-growth model.
fn assigned_tokens() -> &'static Mutex<HashMap<usize, String>> {
    static ASSIGNED: OnceLock<Mutex<HashMap<usize, String>>> = OnceLock::new();
    ASSIGNED.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Derives the identifier under which an observable is registered.
///
/// Named observables contribute their inherent name as-is. Anonymous ones
/// receive a sequential `#<n>` token on first derivation; repeated
/// derivations for the same live handle return the same token.
///
/// # Examples
///
/// ```rust
/// use osservabili::observables::{derive_identifier, named, observable, Context, Value};
///
/// let sq = named("sq", |_cx: &Context| Ok(Value::from(0)));
/// assert_eq!(derive_identifier(&sq), "sq");
///
/// let anon = observable(|_cx: &Context| Ok(Value::from(0)));
/// let token = derive_identifier(&anon);
/// assert!(token.starts_with('#'));
/// assert_eq!(derive_identifier(&anon), token);
/// ```
pub fn derive_identifier(observable: &SharedObservable) -> String {
    if let Some(name) = observable.name() {
        return name.to_string();
    }

    let key = Arc::as_ptr(observable) as *const () as usize;
    let mut assigned = assigned_tokens()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    assigned.entry(key).or_insert_with(next_token).clone()
}

/// A callable decorated with an inherent name.
///
/// The wrapper delegates invocation untouched and only adds the name, so a
/// `Named` closure and the bare closure behave identically under `update`.
///
/// # Examples
///
/// ```rust
/// use osservabili::observables::{Context, Named, Observable, Value};
///
/// let inc = Named::new("inc", |cx: &Context| {
///     let x = cx.require_arg(0)?.expect_i64()?;
///     Ok(Value::from(x + 1))
/// });
///
/// assert_eq!(inc.name(), Some("inc"));
/// assert_eq!(inc.observe(&Context::new().arg(4)).unwrap(), Value::Int(5));
/// ```
pub struct Named<F> {
    name: String,
    func: F,
}

impl<F> Named<F> {
    /// Wraps `func` under the given name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Observable for Named<F>
where
    F: Fn(&Context) -> ObserveResult + Send + Sync,
{
    fn observe(&self, cx: &Context) -> ObserveResult {
        (self.func)(cx)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observables::{named, observable, Value};

    #[test]
    fn named_observable_uses_inherent_name() {
        let obs = named("loss", |_cx: &Context| Ok(Value::from(0.0)));
        assert_eq!(derive_identifier(&obs), "loss");
        // Derivation of a named observable is trivially stable.
        assert_eq!(derive_identifier(&obs), "loss");
    }

    #[test]
    fn anonymous_tokens_are_stable_per_handle() {
        let obs = observable(|_cx: &Context| Ok(Value::from(0)));

        let first = derive_identifier(&obs);
        let second = derive_identifier(&obs);
        assert_eq!(first, second);
        assert!(first.starts_with('#'));
    }

    #[test]
    fn distinct_anonymous_callables_get_distinct_tokens() {
        let a = observable(|_cx: &Context| Ok(Value::from(0)));
        let b = observable(|_cx: &Context| Ok(Value::from(0)));

        assert_ne!(derive_identifier(&a), derive_identifier(&b));
    }

    #[test]
    fn clones_of_one_handle_share_a_token() {
        let a = observable(|_cx: &Context| Ok(Value::from(0)));
        let a2 = Arc::clone(&a);

        assert_eq!(derive_identifier(&a), derive_identifier(&a2));
    }
}
