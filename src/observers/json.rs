//! JSON view for serializing registry logs.
//!
//! This module provides [`JsonView`], which serializes a [`Registry`]'s
//! snapshot to JSON using serde. The output is the plain
//! identifier-to-values mapping of [`RegistrySnapshot`], in registration
//! order, so it can be written to disk and later fed back through
//! [`Registry::from_snapshot`](crate::registry::Registry::from_snapshot)
//! for offline inspection.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature:
//!
//! ```toml
//! [dependencies]
//! osservabili = { version = "0.2", features = ["json"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use osservabili::observers::json::JsonView;
//!
//! let json = JsonView::new().to_json(&registry)?;
//! println!("{}", json);
//! // {"columns":[{"identifier":"sq","values":[4,9,16]},{"identifier":"inc","values":[3,4,5]}]}
//! ```

use crate::registry::Registry;
use crate::snapshot::RegistrySnapshot;

/// A view that serializes registry logs to JSON.
///
/// # Examples
///
/// ```rust,ignore
/// use osservabili::observers::json::JsonView;
///
/// let view = JsonView::new().pretty(true);
/// let json = view.to_json(&registry)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonView {
    pretty: bool,
}

impl JsonView {
    /// Creates a new JSON view with compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Serializes the registry's snapshot to a JSON string.
    pub fn to_json(&self, registry: &Registry) -> Result<String, serde_json::Error> {
        let snapshot = RegistrySnapshot::capture(registry);
        if self.pretty {
            serde_json::to_string_pretty(&snapshot)
        } else {
            serde_json::to_string(&snapshot)
        }
    }

    /// Serializes the registry's snapshot to a JSON byte vector.
    pub fn to_json_bytes(&self, registry: &Registry) -> Result<Vec<u8>, serde_json::Error> {
        let snapshot = RegistrySnapshot::capture(registry);
        serde_json::to_vec(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observables::{named, Context, Value};

    fn sample_registry() -> Registry {
        let mut registry = Registry::from_observables([
            named("sq", |cx: &Context| {
                Ok(Value::from(cx.require_arg(0)?.expect_i64()?.pow(2)))
            }),
            named("inc", |cx: &Context| {
                Ok(Value::from(cx.require_arg(0)?.expect_i64()? + 1))
            }),
        ])
        .unwrap();

        for x in [2, 3, 4] {
            registry.update(&Context::new().arg(x)).unwrap();
        }
        registry
    }

    #[test]
    fn to_json_empty_registry() {
        let json = JsonView::new().to_json(&Registry::new()).unwrap();
        assert_eq!(json, r#"{"columns":[]}"#);
    }

    #[test]
    fn to_json_preserves_order_and_values() {
        let json = JsonView::new().to_json(&sample_registry()).unwrap();

        assert_eq!(
            json,
            r#"{"columns":[{"identifier":"sq","values":[4,9,16]},{"identifier":"inc","values":[3,4,5]}]}"#
        );
    }

    #[test]
    fn to_json_pretty() {
        let json = JsonView::new()
            .pretty(true)
            .to_json(&sample_registry())
            .unwrap();

        // Pretty JSON contains newlines.
        assert!(json.contains('\n'));
        assert!(json.contains("sq"));
    }

    #[test]
    fn to_json_bytes_matches_string() {
        let registry = sample_registry();
        let bytes = JsonView::new().to_json_bytes(&registry).unwrap();
        let json = JsonView::new().to_json(&registry).unwrap();

        assert_eq!(String::from_utf8(bytes).unwrap(), json);
    }

    #[test]
    fn serialized_output_round_trips_into_a_registry() {
        let json = JsonView::new().to_json(&sample_registry()).unwrap();

        let snapshot: RegistrySnapshot = serde_json::from_str(&json).unwrap();
        let archived = Registry::from_snapshot(snapshot).unwrap();

        assert_eq!(
            archived.identifiers().collect::<Vec<_>>(),
            ["sq", "inc"]
        );
        assert_eq!(
            archived.log("sq").unwrap(),
            [Value::Int(4), Value::Int(9), Value::Int(16)]
        );
    }
}
