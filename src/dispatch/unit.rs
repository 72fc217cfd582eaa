//! Generating units and their quadratic production-cost curves.

use crate::error::{DispatchError, Result};

/// A generating unit with cost `a·x² + b·x + c` over the output range `[pl, pu]` MW.
///
/// Units are validated on construction and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawUnit")
)]
pub struct Unit {
    a: f64,
    b: f64,
    c: f64,
    pl: u32,
    pu: u32,
}

impl Unit {
    /// Build a unit from cost coefficients and integer output bounds.
    ///
    /// Errors are reported against unit index 0; [`Fleet`](super::Fleet)
    /// re-labels them with the unit's position.
    pub fn new(a: f64, b: f64, c: f64, pl: u32, pu: u32) -> Result<Self> {
        Self { a, b, c, pl, pu }.checked(0)
    }

    /// Build unit `index` from a data row `(a, b, c, pu, pl)`.
    ///
    /// Bounds are truncated toward zero, the same coercion a float-to-int
    /// column cast applies. Negative or non-finite bounds are rejected.
    pub fn from_row(index: usize, row: &[f64]) -> Result<Self> {
        let &[a, b, c, pu, pl] = row else {
            return Err(DispatchError::MalformedRow {
                row: index,
                found: row.len(),
            });
        };
        let pu = coerce_bound(index, "upper", pu)?;
        let pl = coerce_bound(index, "lower", pl)?;
        Self { a, b, c, pl, pu }.checked(index)
    }

    pub(crate) fn checked(self, index: usize) -> Result<Self> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !value.is_finite() {
                return Err(DispatchError::NonFiniteCoefficient {
                    unit: index,
                    name,
                    value,
                });
            }
        }
        if self.pl > self.pu {
            return Err(DispatchError::InvertedBounds {
                unit: index,
                pl: self.pl,
                pu: self.pu,
            });
        }
        for level in self.extreme_levels() {
            let value = self.boundless_cost(level);
            if !value.is_finite() {
                return Err(DispatchError::NonFiniteCost {
                    unit: index,
                    level,
                    value,
                });
            }
        }
        Ok(self)
    }

    /// Levels where the curve over `[pl, pu]` reaches its extremes: both
    /// bounds and the integer neighbours of the parabola's vertex.
    fn extreme_levels(&self) -> impl Iterator<Item = usize> {
        let (pl, pu) = (self.pl as usize, self.pu as usize);
        let vertex = (self.a != 0.0)
            .then(|| -self.b / (2.0 * self.a))
            .filter(|v| v.is_finite() && *v > pl as f64 && *v < pu as f64);
        let (below, above) = match vertex {
            Some(v) => (Some(v.floor() as usize), Some(v.ceil() as usize)),
            None => (None, None),
        };
        [Some(pl), Some(pu), below, above].into_iter().flatten()
    }

    /// Largest cost magnitude the unit can contribute while producing.
    pub(crate) fn peak_cost(&self) -> f64 {
        self.extreme_levels()
            .map(|level| self.boundless_cost(level).abs())
            .fold(0.0, f64::max)
    }

    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Lower output bound in MW.
    #[inline]
    pub fn pl(&self) -> u32 {
        self.pl
    }

    /// Upper output bound in MW.
    #[inline]
    pub fn pu(&self) -> u32 {
        self.pu
    }

    /// Whether the unit can produce exactly `level` MW (0 means off).
    #[inline]
    pub fn can_produce(&self, level: usize) -> bool {
        level == 0 || (self.pl as usize <= level && level <= self.pu as usize)
    }

    /// Production cost at `level` MW, `f64::INFINITY` when outside `[pl, pu]`.
    ///
    /// An idle unit costs nothing regardless of its bounds.
    #[inline]
    pub fn cost(&self, level: usize) -> f64 {
        if level == 0 {
            0.0
        } else if self.can_produce(level) {
            self.boundless_cost(level)
        } else {
            f64::INFINITY
        }
    }

    /// Cost curve evaluated at `level` with the bounds ignored.
    #[inline]
    pub fn boundless_cost(&self, level: usize) -> f64 {
        let x = level as f64;
        self.a * x * x + self.b * x + self.c
    }
}

/// Unvalidated wire form of [`Unit`]; deserialization goes through [`Unit::checked`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUnit {
    a: f64,
    b: f64,
    c: f64,
    pl: u32,
    pu: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUnit> for Unit {
    type Error = DispatchError;

    fn try_from(raw: RawUnit) -> Result<Self> {
        Unit::new(raw.a, raw.b, raw.c, raw.pl, raw.pu)
    }
}

fn coerce_bound(unit: usize, name: &'static str, value: f64) -> Result<u32> {
    if !value.is_finite() || value < 0.0 || value.trunc() > u32::MAX as f64 {
        return Err(DispatchError::InvalidBound { unit, name, value });
    }
    Ok(value.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_unit_is_free_even_with_fixed_cost() {
        let u = Unit::new(0.5, 2.0, 100.0, 10, 50).unwrap();
        assert_eq!(u.cost(0), 0.0);
        assert_eq!(u.boundless_cost(0), 100.0);
    }

    #[test]
    fn cost_inside_and_outside_bounds() {
        let u = Unit::new(1.0, 2.0, 3.0, 2, 4).unwrap();
        assert_eq!(u.cost(1), f64::INFINITY);
        assert_eq!(u.cost(2), 4.0 + 4.0 + 3.0);
        assert_eq!(u.cost(4), 16.0 + 8.0 + 3.0);
        assert_eq!(u.cost(5), f64::INFINITY);
        assert_eq!(u.boundless_cost(5), 25.0 + 10.0 + 3.0);
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = Unit::new(0.0, 1.0, 0.0, 6, 5).unwrap_err();
        assert_eq!(
            err,
            DispatchError::InvertedBounds {
                unit: 0,
                pl: 6,
                pu: 5
            }
        );
    }

    #[test]
    fn rejects_nan_coefficient() {
        assert!(matches!(
            Unit::new(f64::NAN, 1.0, 0.0, 0, 5),
            Err(DispatchError::NonFiniteCoefficient { name: "a", .. })
        ));
    }

    #[test]
    fn rejects_cost_overflowing_to_negative_infinity() {
        assert_eq!(
            Unit::new(-1e308, 0.0, 0.0, 0, 10).unwrap_err(),
            DispatchError::NonFiniteCost {
                unit: 0,
                level: 10,
                value: f64::NEG_INFINITY
            }
        );
    }

    #[test]
    fn rejects_cost_overflowing_to_nan() {
        assert!(matches!(
            Unit::new(1e308, -1e308, 0.0, 0, 10),
            Err(DispatchError::NonFiniteCost { level: 10, value, .. }) if value.is_nan()
        ));
    }

    #[test]
    fn vertex_inside_bounds_is_checked() {
        // Exact powers of two: cost(0) = cost(10) = -MAX, cost(5) overflows.
        let scale = 2f64.powi(970);
        let u = Unit {
            a: scale,
            b: -10.0 * scale,
            c: -f64::MAX,
            pl: 0,
            pu: 10,
        };
        assert_eq!(u.boundless_cost(0), -f64::MAX);
        assert_eq!(u.boundless_cost(10), -f64::MAX);
        assert_eq!(
            u.checked(3),
            Err(DispatchError::NonFiniteCost {
                unit: 3,
                level: 5,
                value: f64::NEG_INFINITY
            })
        );
    }

    #[test]
    fn peak_cost_spans_bounds_and_vertex() {
        let u = Unit::new(1.0, -10.0, 0.0, 2, 8).unwrap();
        // cost(2) = -16, cost(5) = -25, cost(8) = -16
        assert_eq!(u.peak_cost(), 25.0);
    }

    #[test]
    fn row_bounds_are_truncated() {
        // column order is a b c pu pl
        let u = Unit::from_row(2, &[0.1, 2.0, 30.0, 99.9, 10.7]).unwrap();
        assert_eq!(u.pu(), 99);
        assert_eq!(u.pl(), 10);
        assert_eq!(u.c(), 30.0);
    }

    #[test]
    fn row_rejects_negative_bound() {
        let err = Unit::from_row(1, &[0.0, 1.0, 0.0, 10.0, -1.0]).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::InvalidBound {
                unit: 1,
                name: "lower",
                ..
            }
        ));
    }

    #[test]
    fn row_rejects_wrong_arity() {
        assert_eq!(
            Unit::from_row(4, &[1.0, 2.0, 3.0]).unwrap_err(),
            DispatchError::MalformedRow { row: 4, found: 3 }
        );
    }
}
