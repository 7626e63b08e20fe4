//! Shared invocation context broadcast to every observable.
//!
//! A [`Context`] is a bag of arguments assembled by the caller once per
//! update call: an ordered sequence of positional values plus named values.
//! Every registered observable receives the *same* context; each one reads
//! only the values it cares about, and unused values are ignored by
//! construction. Asking for an absent value through the `require*` accessors
//! is the canonical invocation failure.

use super::error::ObserveError;
use super::value::Value;

/// The shared bag of positional and named values for one update call.
///
/// Built in the builder style and passed by reference to
/// [`Registry::update`](crate::registry::Registry::update).
///
/// # Examples
///
/// ```rust
/// use osservabili::observables::{Context, Value};
///
/// let cx = Context::new()
///     .arg(2.5)
///     .with("step", 10)
///     .with("lr", 0.01);
///
/// assert_eq!(cx.get_arg(0), Some(&Value::Float(2.5)));
/// assert_eq!(cx.get("lr"), Some(&Value::Float(0.01)));
/// assert!(cx.get("momentum").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    positional: Vec<Value>,
    named: Vec<(String, Value)>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional value, returning `self` for chaining.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Adds a named value, returning `self` for chaining.
    ///
    /// Adding the same name twice does not fail; the later value shadows the
    /// earlier one on lookup.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }

    /// All positional values, in order.
    pub fn args(&self) -> &[Value] {
        &self.positional
    }

    /// The positional value at `index`, if present.
    pub fn get_arg(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// The positional value at `index`, or
    /// [`ObserveError::MissingPositional`].
    pub fn require_arg(&self, index: usize) -> Result<&Value, ObserveError> {
        self.get_arg(index)
            .ok_or(ObserveError::MissingPositional(index))
    }

    /// The named values, in insertion order.
    pub fn named(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.named.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Looks up a named value. Later additions shadow earlier ones.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Whether a named value is present.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Looks up a named value, or [`ObserveError::MissingNamed`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osservabili::observables::Context;
    ///
    /// let cx = Context::new().with("lr", 0.01);
    /// assert!(cx.require("lr").is_ok());
    /// assert!(cx.require("momentum").is_err());
    /// ```
    pub fn require(&self, name: &str) -> Result<&Value, ObserveError> {
        self.get(name)
            .ok_or_else(|| ObserveError::MissingNamed(name.to_string()))
    }
}
