//! # Osservabili - Observable Registry for Iterative Computations
//!
//! A Rust library for ad-hoc, low-overhead metric tracking inside iterative
//! processes (optimization loops, simulations, solvers). You register a set
//! of named **observables** - arbitrary callables - and, at chosen points of
//! your own loop, broadcast a shared **invocation context** to all of them.
//! Each observable's result is appended to its per-observable **log**, which
//! you can later read back per identifier or export as a column-oriented
//! table.
//!
//! ## The Problem
//!
//! Instrumenting a hand-written loop usually starts innocently - a couple of
//! `Vec` variables collecting intermediate values - and degenerates into a
//! tangle of parallel vectors, manual pushes scattered through the loop body,
//! and fragile post-hoc alignment of "which value belongs to which step".
//!
//! ## The Solution: a Registry of Observables
//!
//! This library centralizes that bookkeeping. The loop body performs a single
//! call per step:
//!
//! ```text
//!                    ┌───────────────────────────────────┐
//!                    │             Registry              │
//!                    ├───────────────────────────────────┤
//!   update(&cx) ──►  │ "loss"  ──► callable ──► log ████ │
//!                    │ "x"     ──► callable ──► log ████ │
//!                    │ "grad"  ──► callable ──► log ████ │
//!                    └───────────────────────────────────┘
//!                                     │
//!                                     ▼
//!                      results() / to_table() / snapshot()
//! ```
//!
//! Every registered callable receives the same context (positional plus named
//! values) and its return value lands in its own log, in call order. Column
//! order of the table export is registration order.
//!
//! ## Design Principles
//!
//! 1. **Single owner, no locks**: `update` takes `&mut self`; the borrow
//!    checker enforces the single-writer model, so the registry holds no
//!    synchronization state at all.
//! 2. **Fail-fast updates**: the first failing observable aborts the whole
//!    `update` call. Logs of already-processed entries keep their new element;
//!    there is no rollback. See the hazard note on
//!    [`Registry::update`](registry::Registry::update).
//! 3. **Dynamic result values**: logs store a tagged
//!    [`Value`](observables::Value) variant, so heterogeneous results are
//!    fine; table export merely assumes each column is practically
//!    homogeneous for downstream analysis.
//! 4. **Unbounded logs by design**: memory grows linearly with
//!    `updates × observables`. No eviction, no truncation - bounding is the
//!    caller's call.
//!
//! ## Quick Start
//!
//! ```rust
//! use osservabili::observables::{named, Context, Value};
//! use osservabili::registry::Registry;
//!
//! let mut registry = Registry::from_observables([
//!     named("sq", |cx: &Context| {
//!         let x = cx.require_arg(0)?.expect_i64()?;
//!         Ok(Value::from(x * x))
//!     }),
//!     named("inc", |cx: &Context| {
//!         let x = cx.require_arg(0)?.expect_i64()?;
//!         Ok(Value::from(x + 1))
//!     }),
//! ])
//! .unwrap();
//!
//! for x in 2..5 {
//!     registry.update(&Context::new().arg(x)).unwrap();
//! }
//!
//! assert_eq!(
//!     registry.log("sq").unwrap(),
//!     [Value::Int(4), Value::Int(9), Value::Int(16)]
//! );
//! assert_eq!(
//!     registry.log("inc").unwrap(),
//!     [Value::Int(3), Value::Int(4), Value::Int(5)]
//! );
//! ```
//!
//! ## Naming
//!
//! Observables registered through [`named`](observables::named) carry an
//! inherent identifier. Bare closures get a per-process placeholder token
//! (`#1`, `#2`, ...) derived at registration; callers who need stable,
//! meaningful names must supply them explicitly. Duplicate identifiers are
//! rejected at construction time.
//!
//! ## Observers
//!
//! Optional export modules, each behind a feature flag:
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `table` | [`observers::table`] | Render logs as an ASCII table, one row per update step |
//! | `json`  | [`observers::json`]  | Serialize logs to JSON |
//! | `serde` | [`snapshot`] | Serializable snapshot of all logs, and registry reconstruction |
//! | `full`  | All of the above | |
//!
//! ### Example: Table Output
//!
//! ```toml
//! [dependencies]
//! osservabili = { version = "0.2", features = ["table"] }
//! ```
//!
//! ```rust,ignore
//! use osservabili::observers::table::{TableStyle, TableView};
//!
//! let view = TableView::new()
//!     .with_style(TableStyle::Rounded)
//!     .step_column(true)
//!     .tail(10);
//! println!("{}", view.render(&registry));
//! // ╭──────┬──────┬─────╮
//! // │ step │ loss │ x   │
//! // ├──────┼──────┼─────┤
//! // │ 40   │ 0.02 │ 2.9 │
//! // │ 41   │ 0.01 │ 2.9 │
//! // ╰──────┴──────┴─────╯
//! ```
//!
//! ### Example: Persistence
//!
//! ```toml
//! [dependencies]
//! osservabili = { version = "0.2", features = ["json"] }
//! ```
//!
//! ```rust,ignore
//! use osservabili::observers::json::JsonView;
//! use osservabili::registry::Registry;
//!
//! let json = JsonView::new().pretty(true).to_json(&registry)?;
//!
//! // Later, rebuild a read-only registry from the stored snapshot.
//! let snapshot = serde_json::from_str(&json)?;
//! let archived = Registry::from_snapshot(snapshot)?;
//! assert!(archived.log("loss").is_ok()); // results work, update() does not
//! ```

pub mod observables;
pub mod observers;
pub mod registry;

#[cfg(feature = "serde")]
pub mod snapshot;
