//! Export views over a registry's accumulated logs.
//!
//! The registry core exposes its results as plain data
//! ([`Registry::results`](crate::registry::Registry::results) and
//! [`Registry::to_table`](crate::registry::Registry::to_table)); the modules
//! here are the optional rendering glue on top of that boundary:
//!
//! - [`table`] - Render logs as an ASCII table, one row per update step,
//!   using the `tabled` crate
//! - [`json`] - Serialize logs to JSON via serde
//!
//! # Feature Flags
//!
//! Each view is gated behind a feature flag to minimize dependencies:
//!
//! | Feature | Module |
//! |---------|--------|
//! | `table` | [`table`] |
//! | `json`  | [`json`] |
//! | `full`  | All views |
//!
//! # Example
//!
//! ```rust,ignore
//! use osservabili::observers::json::JsonView;
//! use osservabili::observers::table::{TableStyle, TableView};
//!
//! #[cfg(feature = "table")]
//! println!("{}", TableView::new().with_style(TableStyle::Rounded).render(&registry));
//!
//! #[cfg(feature = "json")]
//! std::fs::write("run.json", JsonView::new().to_json(&registry)?)?;
//! ```

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "table")]
pub mod table;
