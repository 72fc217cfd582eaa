//! Economic dispatch as a layered DP instance.
//!
//! Layer `i` adds unit `i` to the prefix of available units. Row `i` holds
//! `f[i][x]`, the cheapest way to meet demand `x` with units `0..i`, and the
//! recorded choice is the output assigned to unit `i - 1` in that optimum.
//!
//! Cell recurrence for layer `i` (unit `i`), demand `x`:
//! - seed with `f[i][x]` (unit `i` off),
//! - scan `y` upward and keep `cost(i, y) + f[i][x - y]` only on strict
//!   improvement, so the first minimal split wins.

use super::{Fleet, UnitCostTable};
use crate::traits::LayeredProblem;

/// DP instance built from a fleet's bounded cost table.
#[derive(Debug, Clone)]
pub struct DispatchProblem {
    costs: UnitCostTable,
    /// `(pl, pu)` per unit, as levels.
    bounds: Vec<(usize, usize)>,
}

impl DispatchProblem {
    pub fn new(fleet: &Fleet) -> Self {
        let costs = UnitCostTable::build(fleet);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            units = costs.num_units(),
            p_max = costs.p_max(),
            "unit cost table built"
        );
        let bounds = fleet
            .units()
            .iter()
            .map(|u| (u.pl() as usize, u.pu() as usize))
            .collect();
        Self { costs, bounds }
    }

    /// The bounded cost table the recurrence reads from.
    pub fn cost_table(&self) -> &UnitCostTable {
        &self.costs
    }

    #[inline]
    pub fn num_units(&self) -> usize {
        self.bounds.len()
    }

    #[inline]
    pub fn p_max(&self) -> usize {
        self.costs.p_max()
    }
}

impl LayeredProblem for DispatchProblem {
    type Cost = f64;
    type Choice = u32;

    fn num_layers(&self) -> usize {
        self.bounds.len()
    }

    fn width(&self) -> usize {
        self.costs.p_max() + 1
    }

    fn init_row(&self) -> Vec<f64> {
        // No units: only zero demand can be met.
        let mut row = vec![f64::INFINITY; self.width()];
        row[0] = 0.0;
        row
    }

    fn relax_cell(&self, layer: usize, prev: &[f64], x: usize) -> (f64, u32) {
        let (pl, pu) = self.bounds[layer];
        let unit_costs = self.costs.row_at(layer);

        let mut best = prev[x];
        let mut split = 0usize;
        // Levels outside [pl, pu] cost +∞ and can never win a strict `<`,
        // so skipping them preserves the first-minimum choice.
        for y in pl.max(1)..=pu.min(x) {
            let candidate = unit_costs[y] + prev[x - y];
            if candidate < best {
                best = candidate;
                split = y;
            }
        }
        // pu fits in u32, so does any split.
        (best, split as u32)
    }
}
