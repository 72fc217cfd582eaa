//! Dense per-unit cost tables over levels `0..=p_max`.

use super::{Fleet, Unit};
use crate::error::{DispatchError, Result};

/// Cost of every unit at every integer level `0..=p_max`, indexed `[unit][level]`.
///
/// [`build`](Self::build) applies the unit bounds (infeasible levels are
/// `+∞`, level 0 is free); [`build_boundless`](Self::build_boundless)
/// evaluates the raw quadratic for comparison curves.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCostTable {
    costs: Vec<Vec<f64>>,
    p_max: usize,
    bounded: bool,
}

impl UnitCostTable {
    /// Materialize the bounded cost of each unit for O(1) lookups.
    pub fn build(fleet: &Fleet) -> Self {
        Self::tabulate(fleet, true, |unit, level| unit.cost(level))
    }

    /// Materialize the cost curve of each unit ignoring `[pl, pu]`.
    pub fn build_boundless(fleet: &Fleet) -> Self {
        Self::tabulate(fleet, false, |unit, level| unit.boundless_cost(level))
    }

    fn tabulate(fleet: &Fleet, bounded: bool, eval: impl Fn(&Unit, usize) -> f64) -> Self {
        let p_max = fleet.p_max();
        let costs = fleet
            .units()
            .iter()
            .map(|unit| (0..=p_max).map(|level| eval(unit, level)).collect())
            .collect();
        Self {
            costs,
            p_max,
            bounded,
        }
    }

    #[inline]
    pub fn num_units(&self) -> usize {
        self.costs.len()
    }

    #[inline]
    pub fn p_max(&self) -> usize {
        self.p_max
    }

    /// Whether unit bounds were applied when the table was built.
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Cost of `unit` at `level`.
    pub fn get(&self, unit: usize, level: usize) -> Result<f64> {
        let row = self.row(unit)?;
        row.get(level)
            .copied()
            .ok_or(DispatchError::LevelOutOfRange {
                level,
                p_max: self.p_max,
            })
    }

    /// Whole cost curve of `unit`, `p_max + 1` entries.
    pub fn row(&self, unit: usize) -> Result<&[f64]> {
        self.costs
            .get(unit)
            .map(Vec::as_slice)
            .ok_or(DispatchError::UnitOutOfRange {
                index: unit,
                units: self.costs.len(),
            })
    }

    /// Unchecked variant of [`row`](Self::row) for the DP inner loop.
    #[inline]
    pub(crate) fn row_at(&self, unit: usize) -> &[f64] {
        &self.costs[unit]
    }

    /// Iterator over every unit's curve, in fleet order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.costs.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Fleet {
        Fleet::new(vec![
            Unit::new(0.0, 2.0, 1.0, 2, 3).unwrap(),
            Unit::new(1.0, 0.0, 0.0, 1, 2).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn bounded_table_marks_infeasible_levels() {
        let table = UnitCostTable::build(&fleet());
        assert_eq!(table.p_max(), 5);
        assert!(table.is_bounded());
        assert_eq!(
            table.row(0).unwrap(),
            &[0.0, f64::INFINITY, 5.0, 7.0, f64::INFINITY, f64::INFINITY]
        );
        assert_eq!(table.get(1, 2), Ok(4.0));
        assert_eq!(table.get(1, 3), Ok(f64::INFINITY));
    }

    #[test]
    fn boundless_table_ignores_limits() {
        let table = UnitCostTable::build_boundless(&fleet());
        assert!(!table.is_bounded());
        assert_eq!(table.row(0).unwrap(), &[1.0, 3.0, 5.0, 7.0, 9.0, 11.0]);
        assert_eq!(table.get(1, 5), Ok(25.0));
    }

    #[test]
    fn lookups_fail_fast_out_of_range() {
        let table = UnitCostTable::build(&fleet());
        assert_eq!(
            table.get(2, 0),
            Err(DispatchError::UnitOutOfRange { index: 2, units: 2 })
        );
        assert_eq!(
            table.get(0, 6),
            Err(DispatchError::LevelOutOfRange { level: 6, p_max: 5 })
        );
        assert_eq!(table.rows().count(), 2);
    }
}
