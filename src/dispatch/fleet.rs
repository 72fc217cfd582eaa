//! An ordered, validated set of units and its derived system bounds.

use super::Unit;
use crate::error::{DispatchError, Result};

/// Non-empty list of units with `p_max = Σ pu` and `p_min = min pl`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Unit>", into = "Vec<Unit>")
)]
pub struct Fleet {
    units: Vec<Unit>,
    p_min: usize,
    p_max: usize,
}

impl Fleet {
    /// Validate `units` and derive the system bounds.
    pub fn new(units: Vec<Unit>) -> Result<Self> {
        if units.is_empty() {
            return Err(DispatchError::EmptyFleet);
        }
        let units = units
            .into_iter()
            .enumerate()
            .map(|(i, u)| u.checked(i))
            .collect::<Result<Vec<_>>>()?;

        let p_max = units
            .iter()
            .try_fold(0usize, |acc, u| acc.checked_add(u.pu() as usize))
            .ok_or(DispatchError::CapacityOverflow)?;
        // Every DP cell sums at most one cost per unit, so a finite total of
        // peaks keeps every filled cell finite.
        let peak_total: f64 = units.iter().map(Unit::peak_cost).sum();
        if !peak_total.is_finite() {
            return Err(DispatchError::CostOverflow);
        }
        let p_min = units.iter().map(|u| u.pl() as usize).min().unwrap_or(0);
        debug_assert!(p_min <= p_max);

        Ok(Self {
            units,
            p_min,
            p_max,
        })
    }

    /// Build a fleet from tabular rows `(a, b, c, pu, pl)`.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let units = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Unit::from_row(i, row.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(units)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false: a fleet holds at least one unit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[inline]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, index: usize) -> Result<&Unit> {
        self.units.get(index).ok_or(DispatchError::UnitOutOfRange {
            index,
            units: self.units.len(),
        })
    }

    /// Smallest lower bound over all units.
    #[inline]
    pub fn p_min(&self) -> usize {
        self.p_min
    }

    /// Total capacity: every unit at its upper bound.
    #[inline]
    pub fn p_max(&self) -> usize {
        self.p_max
    }

    /// Cost of unit `index` producing `level` MW (`+∞` when infeasible).
    pub fn cost(&self, index: usize, level: usize) -> Result<f64> {
        self.check_level(level)?;
        Ok(self.unit(index)?.cost(level))
    }

    pub(crate) fn check_level(&self, level: usize) -> Result<()> {
        if level > self.p_max {
            return Err(DispatchError::LevelOutOfRange {
                level,
                p_max: self.p_max,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<Unit>> for Fleet {
    type Error = DispatchError;

    fn try_from(units: Vec<Unit>) -> Result<Self> {
        Self::new(units)
    }
}

impl From<Fleet> for Vec<Unit> {
    fn from(fleet: Fleet) -> Self {
        fleet.units
    }
}
