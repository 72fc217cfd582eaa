//! Dynamic-programming economic dispatch (DISPATCH-DP)
//!
//! This crate solves the static economic dispatch / unit commitment problem
//! for a fleet of generating units with quadratic cost curves, on integer
//! megawatt steps. For every prefix of units and every demand level from 0
//! to the fleet capacity it finds the cheapest combination of unit outputs.
//!
//! ## Core idea
//! 1. Model the recurrence as a *layered* DP: row `i + 1` depends only on row `i`.
//! 2. Implement the [`LayeredProblem`] trait for that recurrence
//!    ([`dispatch::DispatchProblem`] adds one unit per layer).
//! 3. Let [`LayerEngine`] fill the rows (optionally in parallel within a row)
//!    and keep one decision per cell, so allocations are rebuilt by
//!    backtracking instead of stored in full.
//!
//! Unreachable demand is structural: the table holds `+∞` and the query
//! helpers return `None`. Errors are reserved for malformed input and
//! out-of-range lookups.
//!
//! ## Quick start
//! ```
//! use dispatch_dp::dispatch::{DispatchTables, Fleet, Unit};
//!
//! let fleet = Fleet::new(vec![
//!     Unit::new(0.0, 1.0, 0.0, 0, 5).unwrap(),
//!     Unit::new(0.0, 3.0, 0.0, 0, 5).unwrap(),
//! ])
//! .unwrap();
//! let tables = DispatchTables::solve(&fleet);
//! let d = tables.dispatch(5).unwrap().expect("5 MW is reachable");
//! assert_eq!(d.cost, 5.0);
//! assert_eq!(d.allocation, vec![5, 0]);
//! ```
//!
//! ## Cargo features
//! - `parallel`: evaluate the cells of each row on the rayon pool.
//! - `tracing`: spans around the fill and each layer.
//! - `serde`: derive `Serialize`/`Deserialize` for units, fleets and dispatches.
//! - `cli`: the `dispatch_probe` binary.

pub mod builder;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod tables;
pub mod traits;
pub mod utils;

pub use crate::builder::LayerEngineBuilder;
pub use crate::engine::LayerEngine;
pub use crate::error::{DispatchError, Result};
pub use crate::tables::LayerTables;
pub use crate::traits::LayeredProblem;
