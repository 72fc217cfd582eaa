//! Completed dispatch tables and the queries built on them.
//!
//! The allocation table is stored compressed: for each `(prefix, demand)`
//! cell only the output of the newest unit is kept, and full allocations are
//! reconstructed by walking the prefixes backwards.

use super::{DispatchProblem, Fleet};
use crate::error::{DispatchError, Result};
use crate::tables::LayerTables;
use crate::utils::is_reachable;
use crate::LayerEngine;

/// An economic dispatch decision for one demand level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dispatch {
    /// Total demand in MW.
    pub demand: usize,
    /// Minimum total production cost.
    pub cost: f64,
    /// Output of every unit in MW, in fleet order.
    pub allocation: Vec<u32>,
}

impl Dispatch {
    /// Sum of unit outputs; equals `demand` for tables built by this crate.
    pub fn total_output(&self) -> usize {
        self.allocation.iter().map(|&p| p as usize).sum()
    }

    /// Indices of units producing a non-zero output.
    pub fn committed_units(&self) -> impl Iterator<Item = usize> + '_ {
        self.allocation
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p > 0)
            .map(|(i, _)| i)
    }
}

/// Minimum-cost table `f[prefix][demand]` plus the per-cell split choices.
///
/// Only obtainable from a completed fill, so an infinite entry always means
/// "demand unreachable", never "not yet computed".
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchTables {
    layers: LayerTables<f64, u32>,
    units: usize,
    p_max: usize,
}

impl DispatchTables {
    /// Build the tables for `fleet` with a default-configured engine.
    pub fn solve(fleet: &Fleet) -> Self {
        Self::solve_with(&LayerEngine::new(DispatchProblem::new(fleet)))
    }

    /// Run a pre-configured engine and wrap its rows.
    pub fn solve_with(engine: &LayerEngine<DispatchProblem>) -> Self {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "economic_dispatch",
            units = engine.problem().num_units(),
            p_max = engine.problem().p_max()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let layers = engine.run();
        let tables = Self {
            layers,
            units: engine.problem().num_units(),
            p_max: engine.problem().p_max(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            feasible = tables.cost_curve().iter().filter(|c| c.is_finite()).count(),
            "dispatch tables filled"
        );
        tables
    }

    #[inline]
    pub fn num_units(&self) -> usize {
        self.units
    }

    #[inline]
    pub fn p_max(&self) -> usize {
        self.p_max
    }

    fn check_prefix(&self, prefix: usize) -> Result<()> {
        if prefix > self.units {
            return Err(DispatchError::PrefixOutOfRange {
                prefix,
                units: self.units,
            });
        }
        Ok(())
    }

    fn check_demand(&self, demand: usize) -> Result<()> {
        if demand > self.p_max {
            return Err(DispatchError::LevelOutOfRange {
                level: demand,
                p_max: self.p_max,
            });
        }
        Ok(())
    }

    #[inline]
    fn row_at(&self, prefix: usize) -> &[f64] {
        self.layers.row(prefix).unwrap_or(&[])
    }

    #[inline]
    fn splits_at(&self, prefix: usize) -> &[u32] {
        self.layers.choices(prefix).unwrap_or(&[])
    }

    /// Row `f[prefix][·]`, `p_max + 1` entries; `+∞` marks unreachable demand.
    pub fn min_cost_row(&self, prefix: usize) -> Result<&[f64]> {
        self.check_prefix(prefix)?;
        Ok(self.row_at(prefix))
    }

    /// `f[prefix][demand]`, possibly `+∞`.
    pub fn min_cost(&self, prefix: usize, demand: usize) -> Result<f64> {
        self.check_prefix(prefix)?;
        self.check_demand(demand)?;
        Ok(self.row_at(prefix)[demand])
    }

    /// Full-fleet cost curve `f[N][·]`.
    pub fn cost_curve(&self) -> &[f64] {
        self.row_at(self.units)
    }

    /// Whether the full fleet can meet `demand` exactly.
    pub fn is_feasible(&self, demand: usize) -> Result<bool> {
        Ok(is_reachable(self.min_cost(self.units, demand)?))
    }

    /// Full-fleet minimum cost, `None` when `demand` cannot be met.
    pub fn cost(&self, demand: usize) -> Result<Option<f64>> {
        let cost = self.min_cost(self.units, demand)?;
        Ok(is_reachable(cost).then_some(cost))
    }

    /// Output chosen for unit `prefix - 1` in the optimum of `f[prefix][demand]`.
    ///
    /// Zero for `prefix == 0` and for unreachable cells.
    pub fn split(&self, prefix: usize, demand: usize) -> Result<u32> {
        self.check_prefix(prefix)?;
        self.check_demand(demand)?;
        Ok(self.splits_at(prefix).get(demand).copied().unwrap_or(0))
    }

    /// Per-unit outputs achieving `f[prefix][demand]`, `N` entries with zeros
    /// for units at or beyond `prefix`. `None` when the cell is unreachable.
    pub fn allocation(&self, prefix: usize, demand: usize) -> Result<Option<Vec<u32>>> {
        if !is_reachable(self.min_cost(prefix, demand)?) {
            return Ok(None);
        }
        Ok(Some(self.backtrack(prefix, demand)))
    }

    fn backtrack(&self, prefix: usize, demand: usize) -> Vec<u32> {
        let mut allocation = vec![0u32; self.units];
        let mut remaining = demand;
        for layer in (1..=prefix).rev() {
            let y = self.splits_at(layer)[remaining];
            allocation[layer - 1] = y;
            remaining -= y as usize;
        }
        debug_assert_eq!(remaining, 0, "reachable cell must backtrack to zero demand");
        allocation
    }

    /// Full-fleet economic dispatch for `demand`, `None` when unreachable.
    pub fn dispatch(&self, demand: usize) -> Result<Option<Dispatch>> {
        let Some(cost) = self.cost(demand)? else {
            return Ok(None);
        };
        Ok(Some(Dispatch {
            demand,
            cost,
            allocation: self.backtrack(self.units, demand),
        }))
    }

    /// Every reachable full-fleet dispatch in increasing demand order.
    pub fn feasible_dispatches(&self) -> impl Iterator<Item = Dispatch> + '_ {
        self.cost_curve()
            .iter()
            .enumerate()
            .filter(|(_, c)| is_reachable(**c))
            .map(|(demand, &cost)| Dispatch {
                demand,
                cost,
                allocation: self.backtrack(self.units, demand),
            })
    }

    /// Dense `uc[N][demand][unit]` matrix; unreachable demands are all zero.
    pub fn commitment_matrix(&self) -> Vec<Vec<u32>> {
        (0..=self.p_max)
            .map(|demand| {
                if is_reachable(self.cost_curve()[demand]) {
                    self.backtrack(self.units, demand)
                } else {
                    vec![0; self.units]
                }
            })
            .collect()
    }
}

/// Full-fleet cost curve `f[N][·]` without keeping the intermediate rows.
pub fn cost_curve(fleet: &Fleet) -> Vec<f64> {
    LayerEngine::new(DispatchProblem::new(fleet)).run_final_row()
}
