//! Economic dispatch / unit commitment over integer megawatt levels.
//!
//! The pipeline runs in three explicit phases:
//! - construct: validate a [`Fleet`] of [`Unit`]s,
//! - fill: run the [`DispatchProblem`] through the layered engine,
//! - query: read costs and allocations from the finished [`DispatchTables`].
//!
//! - [`unit`]       : quadratic cost curve with `[pl, pu]` output bounds.
//! - [`fleet`]      : validated unit list and the `p_min` / `p_max` bounds.
//! - [`cost_table`] : dense `[unit][level]` bounded and boundless cost tables.
//! - [`problem`]    : the prefix-by-prefix recurrence.
//! - [`solution`]   : the finished tables, backtracking and dispatch reports.

pub mod cost_table;
pub mod fleet;
pub mod problem;
pub mod solution;
pub mod unit;

pub use cost_table::UnitCostTable;
pub use fleet::Fleet;
pub use problem::DispatchProblem;
pub use solution::{cost_curve, Dispatch, DispatchTables};
pub use unit::Unit;
