//! The observable registry and its update engine.
//!
//! A [`Registry`] is an insertion-ordered mapping from identifier to
//! [`Entry`], where each entry pairs a callable with its accumulated result
//! log. Insertion order defines column order for table export; lookups go
//! through a hash index and are order-independent. Identifiers are unique at
//! all times - duplicate identifiers are rejected at construction rather
//! than silently overwritten.
//!
//! # Update Semantics
//!
//! [`Registry::update`] performs a strictly sequential scan over entries in
//! insertion order, invoking each callable with the same shared [`Context`]
//! and appending the result to that entry's log. The scan is fail-fast: the
//! first invocation error aborts the call, and appends already made are
//! *not* rolled back. After a partial failure, logs of already-processed
//! entries are one element longer than those of not-yet-processed ones.
//! This misalignment is the one consistency hazard callers must be aware of;
//! the registry never masks it.
//!
//! # Examples
//!
//! ```rust
//! use osservabili::observables::{named, Context, Value};
//! use osservabili::registry::Registry;
//!
//! let mut registry = Registry::from_pairs([
//!     ("twice", named("twice", |cx: &Context| {
//!         Ok(Value::from(cx.require_arg(0)?.expect_i64()? * 2))
//!     })),
//! ])
//! .unwrap();
//!
//! registry.update(&Context::new().arg(21)).unwrap();
//! assert_eq!(registry.log("twice").unwrap(), [Value::Int(42)]);
//! ```

mod error;

pub use error::{RegistryError, Result};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::observables::{derive_identifier, Context, SharedObservable, Value};

/// One registered observable: its identifier, callable, and result log.
///
/// The callable is fixed at entry creation; the only way to change it is the
/// explicit [`Registry::set`] overwrite, which resets the log. `callable` is
/// `None` only for entries reconstructed from a snapshot, which support
/// result inspection but not updates.
#[derive(Clone)]
pub struct Entry {
    identifier: String,
    callable: Option<SharedObservable>,
    log: Vec<Value>,
}

impl Entry {
    /// The identifier this entry is registered under.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The callable, if one is attached.
    pub fn callable(&self) -> Option<&SharedObservable> {
        self.callable.as_ref()
    }

    /// The ordered, append-only result log.
    pub fn log(&self) -> &[Value] {
        &self.log
    }

    /// Whether this entry has no callable attached (snapshot-reconstructed).
    pub fn is_detached(&self) -> bool {
        self.callable.is_none()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("identifier", &self.identifier)
            .field("attached", &self.callable.is_some())
            .field("log", &self.log)
            .finish()
    }
}

/// One column of the table export: an identifier and its log.
///
/// Column order is registry insertion order. Columns of a registry that
/// suffered a partial update failure have unequal lengths; `to_table` does
/// not validate or mask that.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    /// The identifier the column belongs to.
    pub identifier: &'a str,
    /// The column's values, one per successful update call.
    pub values: &'a [Value],
}

/// The insertion-ordered registry of observables.
///
/// Created once (from pairs, bare callables, or empty), mutated only by
/// [`update`](Registry::update) and explicit [`set`](Registry::set), and
/// read through the results accessors or the snapshot/table exports.
///
/// `update` takes `&mut self`: the single-writer model is enforced by the
/// borrow checker, and the registry holds no locks. Sharing across threads
/// requires external synchronization.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries)
            .finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `(identifier, callable)` pairs.
    ///
    /// Pair order becomes insertion order. Fails with
    /// [`RegistryError::DuplicateIdentifier`] if two pairs share an
    /// identifier; nothing is silently overwritten.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osservabili::observables::{observable, Context, Value};
    /// use osservabili::registry::Registry;
    ///
    /// let registry = Registry::from_pairs([
    ///     ("a", observable(|_cx: &Context| Ok(Value::from(1)))),
    ///     ("b", observable(|_cx: &Context| Ok(Value::from(2)))),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(registry.identifiers().collect::<Vec<_>>(), ["a", "b"]);
    /// ```
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, SharedObservable)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (identifier, callable) in pairs {
            registry.insert_new(identifier.into(), Some(callable), Vec::new())?;
        }
        Ok(registry)
    }

    /// Builds a registry from bare callables, deriving their identifiers.
    ///
    /// Named observables contribute their inherent name; anonymous ones get
    /// a per-process placeholder token (see
    /// [`derive_identifier`](crate::observables::derive_identifier)). Fails
    /// with [`RegistryError::DuplicateIdentifier`] if derivation collides -
    /// two observables named alike, for instance.
    pub fn from_observables<I>(observables: I) -> Result<Self>
    where
        I: IntoIterator<Item = SharedObservable>,
    {
        let mut registry = Self::new();
        for callable in observables {
            let identifier = derive_identifier(&callable);
            registry.insert_new(identifier, Some(callable), Vec::new())?;
        }
        Ok(registry)
    }

    /// Appends a brand-new entry, rejecting duplicate identifiers.
    pub(crate) fn insert_new(
        &mut self,
        identifier: String,
        callable: Option<SharedObservable>,
        log: Vec<Value>,
    ) -> Result<()> {
        if self.index.contains_key(&identifier) {
            return Err(RegistryError::DuplicateIdentifier(identifier));
        }
        self.index.insert(identifier.clone(), self.entries.len());
        self.entries.push(Entry {
            identifier,
            callable,
            log,
        });
        Ok(())
    }

    /// Looks up an entry by identifier.
    pub fn get(&self, identifier: &str) -> Result<&Entry> {
        self.index
            .get(identifier)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::NotFound(identifier.to_string()))
    }

    /// Inserts or replaces the entry for `identifier`.
    ///
    /// Overwrite semantics: replacing an existing entry resets its log to
    /// empty. Prior results are not merged; capture a snapshot first if they
    /// matter. New entries land at the end of the insertion order; replaced
    /// entries keep their position.
    pub fn set(&mut self, identifier: impl Into<String>, callable: SharedObservable) {
        let identifier = identifier.into();
        match self.index.get(&identifier) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.callable = Some(callable);
                entry.log.clear();
            }
            None => {
                self.index.insert(identifier.clone(), self.entries.len());
                self.entries.push(Entry {
                    identifier,
                    callable: Some(callable),
                    log: Vec::new(),
                });
            }
        }
    }

    /// The number of registered observables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The identifiers, in insertion order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.identifier.as_str())
    }

    /// The entries, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// A clean slate with the same configuration.
    ///
    /// The copy shares the callables (by handle) and keeps identifier order,
    /// but every log starts empty. Accumulated results stay with `self`.
    /// For a full copy including results, use `clone()`.
    pub fn clean_copy(&self) -> Registry {
        Registry {
            entries: self
                .entries
                .iter()
                .map(|entry| Entry {
                    identifier: entry.identifier.clone(),
                    callable: entry.callable.clone(),
                    log: Vec::new(),
                })
                .collect(),
            index: self.index.clone(),
        }
    }

    /// Invokes every observable with the shared context, appending results.
    ///
    /// Entries are processed strictly in insertion order. Each successful
    /// invocation appends exactly one element to that entry's log.
    ///
    /// # Fail-Fast Hazard
    ///
    /// The first error aborts the call and propagates unmodified; appends
    /// already made are kept. Logs may therefore end up with unequal lengths
    /// after a failed update - the registry does not roll back, skip, or
    /// retry. Callers wanting per-entry isolation must build it into their
    /// callables (e.g. catch and encode failures as values).
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Observe`] (transparent) if a callable fails or
    ///   cannot accept the context shape.
    /// - [`RegistryError::Detached`] if an entry has no callable attached
    ///   (snapshot-reconstructed registries).
    pub fn update(&mut self, cx: &Context) -> Result<()> {
        for entry in &mut self.entries {
            let callable = entry
                .callable
                .as_ref()
                .ok_or_else(|| RegistryError::Detached(entry.identifier.clone()))?;
            let value = callable.observe(cx)?;
            entry.log.push(value);
        }
        Ok(())
    }

    /// All logs, keyed by identifier, in insertion order.
    pub fn results(&self) -> Vec<(&str, &[Value])> {
        self.entries
            .iter()
            .map(|entry| (entry.identifier.as_str(), entry.log.as_slice()))
            .collect()
    }

    /// One observable's log, by identifier.
    pub fn log(&self, identifier: &str) -> Result<&[Value]> {
        self.get(identifier).map(Entry::log)
    }

    /// Reverse lookup: the identifier a callable was registered under.
    ///
    /// Identity is the shared allocation: pass a clone of the handle that
    /// was registered. A linear scan, matching the expected handful of
    /// entries per registry.
    pub fn identifier_of(&self, callable: &SharedObservable) -> Result<&str> {
        self.entries
            .iter()
            .find(|entry| {
                entry
                    .callable
                    .as_ref()
                    .is_some_and(|c| Arc::ptr_eq(c, callable))
            })
            .map(|entry| entry.identifier.as_str())
            .ok_or(RegistryError::UnregisteredCallable)
    }

    /// One observable's log, by the originally registered callable handle.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osservabili::observables::{named, Context, Value};
    /// use osservabili::registry::Registry;
    ///
    /// let sq = named("sq", |cx: &Context| {
    ///     Ok(Value::from(cx.require_arg(0)?.expect_i64()?.pow(2)))
    /// });
    ///
    /// let mut registry = Registry::from_observables([sq.clone()]).unwrap();
    /// registry.update(&Context::new().arg(3)).unwrap();
    ///
    /// assert_eq!(registry.log_of(&sq).unwrap(), registry.log("sq").unwrap());
    /// ```
    pub fn log_of(&self, callable: &SharedObservable) -> Result<&[Value]> {
        let identifier = self.identifier_of(callable)?;
        self.log(identifier)
    }

    /// The column-oriented table projection, in insertion order.
    ///
    /// Each column's length equals that entry's log length; no equal-length
    /// validation is performed. Row `i` across columns corresponds to the
    /// same update call only if every update succeeded uniformly - see the
    /// fail-fast hazard on [`update`](Registry::update).
    pub fn to_table(&self) -> Vec<Column<'_>> {
        self.entries
            .iter()
            .map(|entry| Column {
                identifier: entry.identifier.as_str(),
                values: entry.log.as_slice(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observables::{named, observable, ObserveError};

    fn square() -> SharedObservable {
        named("sq", |cx: &Context| {
            let x = cx.require_arg(0)?.expect_i64()?;
            Ok(Value::from(x * x))
        })
    }

    fn increment() -> SharedObservable {
        named("inc", |cx: &Context| {
            let x = cx.require_arg(0)?.expect_i64()?;
            Ok(Value::from(x + 1))
        })
    }

    fn failing(message: &'static str) -> SharedObservable {
        observable(move |_cx: &Context| Err(ObserveError::failed(message)))
    }

    #[test]
    fn construction_preserves_identifier_order() {
        let registry = Registry::from_pairs([
            ("gamma", square()),
            ("alpha", increment()),
            ("beta", square()),
        ])
        .unwrap();

        assert_eq!(
            registry.identifiers().collect::<Vec<_>>(),
            ["gamma", "alpha", "beta"]
        );
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn duplicate_pairs_are_rejected() {
        let err = Registry::from_pairs([("x", square()), ("x", increment())]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateIdentifier(id) if id == "x"));
    }

    #[test]
    fn derived_name_collision_is_rejected() {
        // Two observables with the same inherent name collide on derivation.
        let err = Registry::from_observables([square(), square()]).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateIdentifier(id) if id == "sq"));

        // The same callables under explicit distinct identifiers are fine.
        let registry =
            Registry::from_pairs([("sq_a", square()), ("sq_b", square())]).unwrap();
        assert_eq!(
            registry.identifiers().collect::<Vec<_>>(),
            ["sq_a", "sq_b"]
        );
    }

    #[test]
    fn anonymous_observables_get_distinct_tokens() {
        let registry = Registry::from_observables([
            observable(|_cx: &Context| Ok(Value::from(1))),
            observable(|_cx: &Context| Ok(Value::from(2))),
        ])
        .unwrap();

        let ids: Vec<&str> = registry.identifiers().collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert!(ids.iter().all(|id| id.starts_with('#')));
    }

    #[test]
    fn update_appends_once_per_entry_in_call_order() {
        let mut registry =
            Registry::from_observables([square(), increment()]).unwrap();

        for x in [10, 20, 30] {
            registry.update(&Context::new().arg(x)).unwrap();
        }

        for entry in registry.entries() {
            assert_eq!(entry.log().len(), 3);
        }
        assert_eq!(
            registry.log("sq").unwrap(),
            [Value::Int(100), Value::Int(400), Value::Int(900)]
        );
        assert_eq!(
            registry.log("inc").unwrap(),
            [Value::Int(11), Value::Int(21), Value::Int(31)]
        );
    }

    #[test]
    fn square_and_increment_scenario() {
        let mut registry =
            Registry::from_pairs([("sq", square()), ("inc", increment())]).unwrap();

        for x in [2, 3, 4] {
            registry.update(&Context::new().arg(x)).unwrap();
        }

        assert_eq!(
            registry.log("sq").unwrap(),
            [Value::Int(4), Value::Int(9), Value::Int(16)]
        );
        assert_eq!(
            registry.log("inc").unwrap(),
            [Value::Int(3), Value::Int(4), Value::Int(5)]
        );
    }

    #[test]
    fn results_matches_single_lookup() {
        let mut registry =
            Registry::from_observables([square(), increment()]).unwrap();
        registry.update(&Context::new().arg(5)).unwrap();

        let results = registry.results();
        assert_eq!(results.len(), 2);
        for (identifier, log) in results {
            assert_eq!(log, registry.log(identifier).unwrap());
        }
    }

    #[test]
    fn lookup_by_callable_matches_lookup_by_identifier() {
        let sq = square();
        let inc = increment();
        let mut registry =
            Registry::from_pairs([("sq", sq.clone()), ("inc", inc.clone())]).unwrap();

        registry.update(&Context::new().arg(6)).unwrap();

        assert_eq!(registry.identifier_of(&sq).unwrap(), "sq");
        assert_eq!(registry.log_of(&sq).unwrap(), registry.log("sq").unwrap());
        assert_eq!(registry.log_of(&inc).unwrap(), registry.log("inc").unwrap());

        let stranger = square();
        assert!(matches!(
            registry.log_of(&stranger).unwrap_err(),
            RegistryError::UnregisteredCallable
        ));
    }

    #[test]
    fn clean_copy_keeps_configuration_and_drops_results() {
        let sq = square();
        let mut registry =
            Registry::from_pairs([("sq", sq.clone()), ("inc", increment())]).unwrap();

        for x in [1, 2, 3] {
            registry.update(&Context::new().arg(x)).unwrap();
        }

        let copy = registry.clean_copy();
        assert_eq!(
            copy.identifiers().collect::<Vec<_>>(),
            registry.identifiers().collect::<Vec<_>>()
        );
        for entry in copy.entries() {
            assert!(entry.log().is_empty());
        }
        // Callables are shared by handle, not re-created.
        assert!(Arc::ptr_eq(copy.get("sq").unwrap().callable().unwrap(), &sq));
        // The source keeps its accumulated results.
        assert_eq!(registry.log("sq").unwrap().len(), 3);
    }

    #[test]
    fn to_table_preserves_order_and_lengths() {
        let mut registry =
            Registry::from_pairs([("sq", square()), ("inc", increment())]).unwrap();
        registry.update(&Context::new().arg(2)).unwrap();
        registry.update(&Context::new().arg(3)).unwrap();

        let table = registry.to_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].identifier, "sq");
        assert_eq!(table[1].identifier, "inc");
        for column in &table {
            assert_eq!(
                column.values.len(),
                registry.log(column.identifier).unwrap().len()
            );
        }
    }

    #[test]
    fn failed_update_leaves_partial_logs() {
        let mut registry = Registry::from_pairs([
            ("first", increment()),
            ("second", failing("boom")),
            ("third", square()),
        ])
        .unwrap();

        let err = registry.update(&Context::new().arg(1)).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Observe(ObserveError::Failed(message)) if message == "boom"
        ));

        // Fail-fast, no rollback: the first log is one element longer than
        // the third's.
        assert_eq!(registry.log("first").unwrap().len(), 1);
        assert_eq!(registry.log("second").unwrap().len(), 0);
        assert_eq!(registry.log("third").unwrap().len(), 0);
        assert_eq!(
            registry.log("first").unwrap().len(),
            registry.log("third").unwrap().len() + 1
        );
    }

    #[test]
    fn incompatible_context_shape_is_an_invocation_error() {
        let mut registry = Registry::from_observables([square()]).unwrap();

        // No positional value at all.
        let err = registry.update(&Context::new()).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Observe(ObserveError::MissingPositional(0))
        ));

        // Wrong value kind.
        let err = registry
            .update(&Context::new().arg("not a number"))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Observe(ObserveError::TypeMismatch { .. })
        ));

        assert!(registry.log("sq").unwrap().is_empty());
    }

    #[test]
    fn extra_named_values_are_ignored() {
        let mut registry = Registry::from_observables([square()]).unwrap();

        registry
            .update(&Context::new().arg(3).with("unused", 99).with("lr", 0.1))
            .unwrap();

        assert_eq!(registry.log("sq").unwrap(), [Value::Int(9)]);
    }

    #[test]
    fn named_context_values_reach_every_observable() {
        let mut registry = Registry::from_pairs([
            ("lr", named("lr", |cx: &Context| Ok(cx.require("lr")?.clone()))),
            (
                "scaled",
                named("scaled", |cx: &Context| {
                    let x = cx.require_arg(0)?.expect_f64()?;
                    let lr = cx.require("lr")?.expect_f64()?;
                    Ok(Value::from(x * lr))
                }),
            ),
        ])
        .unwrap();

        registry
            .update(&Context::new().arg(10.0).with("lr", 0.5))
            .unwrap();

        assert_eq!(registry.log("lr").unwrap(), [Value::Float(0.5)]);
        assert_eq!(registry.log("scaled").unwrap(), [Value::Float(5.0)]);
    }

    #[test]
    fn set_replaces_callable_and_resets_log() {
        let mut registry = Registry::from_pairs([("m", square())]).unwrap();
        registry.update(&Context::new().arg(4)).unwrap();
        assert_eq!(registry.log("m").unwrap(), [Value::Int(16)]);

        registry.set("m", increment());
        assert!(registry.log("m").unwrap().is_empty());

        registry.update(&Context::new().arg(4)).unwrap();
        assert_eq!(registry.log("m").unwrap(), [Value::Int(5)]);
    }

    #[test]
    fn set_appends_new_entries_at_the_end() {
        let mut registry = Registry::from_pairs([("a", square())]).unwrap();
        registry.set("b", increment());

        assert_eq!(registry.identifiers().collect::<Vec<_>>(), ["a", "b"]);
        assert!(registry.get("b").unwrap().log().is_empty());
    }

    #[test]
    fn missing_identifier_is_not_found() {
        let registry = Registry::new();
        assert!(matches!(
            registry.get("ghost").unwrap_err(),
            RegistryError::NotFound(id) if id == "ghost"
        ));
        assert!(matches!(
            registry.log("ghost").unwrap_err(),
            RegistryError::NotFound(_)
        ));
    }
}
