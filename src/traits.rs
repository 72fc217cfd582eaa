//! Core trait definitions for row-by-row (layered) dynamic programs.
//!
//! To plug a recurrence into [`LayerEngine`](crate::engine::LayerEngine),
//! implement [`LayeredProblem`] for a struct that captures the instance
//! (cost tables, bounds, ...).
//!
//! The trait encodes a narrow interface:
//! - Layered structure: rows 0..=L, where row `l + 1` depends only on row `l`.
//! - Fixed width: every row has the same number of cells.
//! - Cell relaxation: each cell of the next row is computed independently from
//!   the completed previous row, returning its value and the decision taken.
//!
//! Because cells within a row are independent, the engine is free to evaluate
//! them in any order (or in parallel) as long as row `l` is complete before
//! row `l + 1` starts.

/// Trait for a layered dynamic program instance.
///
/// Semantics:
/// - There are `L = num_layers()` transitions.
/// - Row 0 comes from [`init_row`](Self::init_row).
/// - `relax_cell(l, row_l, x)` yields cell `x` of row `l + 1` together with
///   the choice that produced it.
/// - The engine keeps every row and every choice, so callers can backtrack.
pub trait LayeredProblem {
    /// Value stored in each cell (a cost, score, probability, ...).
    ///
    /// Only `PartialOrd` is required; implementations decide how incomparable
    /// values (e.g. NaN) are avoided.
    type Cost: Copy + PartialOrd;

    /// Decision recorded for each cell, used for reconstruction.
    type Choice: Copy;

    /// Number of transitions `L`. The engine produces `L + 1` rows.
    fn num_layers(&self) -> usize;

    /// Number of cells in every row.
    fn width(&self) -> usize;

    /// Row 0. Must have exactly [`width`](Self::width) cells.
    fn init_row(&self) -> Vec<Self::Cost>;

    /// Compute cell `x` of row `layer + 1` from the completed row `layer`.
    ///
    /// Requirements:
    /// - Must only depend on `prev` and fixed problem data.
    /// - Must be deterministic, so serial and parallel fills agree bit for bit.
    fn relax_cell(&self, layer: usize, prev: &[Self::Cost], x: usize)
        -> (Self::Cost, Self::Choice);
}
