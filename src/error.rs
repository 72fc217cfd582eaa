//! Error types for fleet construction and table queries.
//!
//! Unmeetable demand is *not* an error: it is represented structurally as an
//! infinite cost in the tables and as `None` from the query helpers. The
//! variants here cover malformed input and out-of-range lookups only.

use thiserror::Error;

/// Errors raised while building a fleet or querying the dispatch tables.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// A fleet needs at least one unit.
    #[error("fleet has no units")]
    EmptyFleet,

    /// Lower output bound exceeds the upper bound.
    #[error("unit {unit}: lower bound {pl} exceeds upper bound {pu}")]
    InvertedBounds { unit: usize, pl: u32, pu: u32 },

    /// A bound was negative, not finite, or too large for an integer level.
    #[error("unit {unit}: invalid {name} bound {value}")]
    InvalidBound {
        unit: usize,
        name: &'static str,
        value: f64,
    },

    /// A cost coefficient was NaN or infinite.
    #[error("unit {unit}: cost coefficient {name} = {value} is not finite")]
    NonFiniteCoefficient {
        unit: usize,
        name: &'static str,
        value: f64,
    },

    /// The cost curve overflows to a non-finite value inside `[pl, pu]`.
    #[error("unit {unit}: cost at {level} MW evaluates to {value}")]
    NonFiniteCost {
        unit: usize,
        level: usize,
        value: f64,
    },

    /// Summing the costs of every unit at full output would overflow.
    #[error("fleet cost range exceeds the floating-point range")]
    CostOverflow,

    /// Sum of upper bounds does not fit the level index type.
    #[error("total capacity overflows the level range")]
    CapacityOverflow,

    /// Unit index outside `0..units`.
    #[error("unit index {index} out of range (fleet has {units} units)")]
    UnitOutOfRange { index: usize, units: usize },

    /// Prefix size outside `0..=units`.
    #[error("prefix size {prefix} out of range (fleet has {units} units)")]
    PrefixOutOfRange { prefix: usize, units: usize },

    /// Generation or demand level above the system maximum.
    #[error("level {level} MW exceeds system maximum {p_max} MW")]
    LevelOutOfRange { level: usize, p_max: usize },

    /// A row of tabular unit data had the wrong number of columns.
    #[error("row {row}: expected 5 columns (a b c pu pl), found {found}")]
    MalformedRow { row: usize, found: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DispatchError>;
