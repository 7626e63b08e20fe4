//! Snapshot types for serializing registry state.
//!
//! A [`RegistrySnapshot`] is the persistence boundary of the crate: a plain
//! ordered mapping from identifier to result values, with serde derives so
//! any serde-compatible format can write it to and read it from durable
//! storage. The crate defines no byte format of its own.
//!
//! A snapshot read back from storage can be turned into a *detached*
//! registry via [`Registry::from_snapshot`]: identifiers and logs are
//! restored for inspection (`results`, `log`, `to_table`), but no callables
//! are attached, so `update` fails with
//! [`RegistryError::Detached`](crate::registry::RegistryError::Detached).
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! osservabili = { version = "0.2", features = ["serde"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use osservabili::registry::Registry;
//! use osservabili::snapshot::RegistrySnapshot;
//!
//! // Serialize with any serde-compatible format.
//! let snapshot = registry.snapshot();
//! let json = serde_json::to_string(&snapshot)?;
//!
//! // Later: rebuild a read-only registry for analysis.
//! let snapshot: RegistrySnapshot = serde_json::from_str(&json)?;
//! let archived = Registry::from_snapshot(snapshot)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::observables::Value;
use crate::registry::{Registry, Result};

/// One observable's stored results: its identifier and log, in call order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSnapshot {
    /// The identifier the observable was registered under.
    pub identifier: String,
    /// The recorded results, one per successful update call.
    pub values: Vec<Value>,
}

impl ColumnSnapshot {
    /// Creates a new column snapshot.
    pub fn new(identifier: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            identifier: identifier.into(),
            values,
        }
    }
}

/// A point-in-time capture of every log in a registry.
///
/// Columns appear in registration order, which is what keeps table export
/// stable across a save/load cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RegistrySnapshot {
    /// The column snapshots, in registration order.
    pub columns: Vec<ColumnSnapshot>,
}

impl RegistrySnapshot {
    /// Creates a snapshot from the given columns.
    pub fn new(columns: Vec<ColumnSnapshot>) -> Self {
        Self { columns }
    }

    /// Captures the current state of a registry.
    pub fn capture(registry: &Registry) -> Self {
        Self {
            columns: registry
                .to_table()
                .into_iter()
                .map(|column| ColumnSnapshot::new(column.identifier, column.values.to_vec()))
                .collect(),
        }
    }

    /// Finds a column by identifier.
    pub fn get(&self, identifier: &str) -> Option<&ColumnSnapshot> {
        self.columns
            .iter()
            .find(|column| column.identifier == identifier)
    }

    /// The number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the snapshot holds no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Registry {
    /// Captures the current state as a [`RegistrySnapshot`].
    ///
    /// Shorthand for [`RegistrySnapshot::capture`].
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::capture(self)
    }

    /// Reconstructs a registry from a stored snapshot, purely for result
    /// inspection.
    ///
    /// The reconstructed registry has no callables attached: `results`,
    /// `log`, and `to_table` work, while `update` fails with
    /// [`RegistryError::Detached`](crate::registry::RegistryError::Detached).
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateIdentifier`](crate::registry::RegistryError::DuplicateIdentifier)
    /// if the snapshot contains two columns with the same identifier.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Self> {
        let mut registry = Registry::new();
        for column in snapshot.columns {
            registry.insert_new(column.identifier, None, column.values)?;
        }
        Ok(registry)
    }
}
