//! Optimization variable traits

use heapless::Vec;

use crate::schedule::MAX_PHASES;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum rows reported by a single variable set or constraint
pub const MAX_ROWS: usize = MAX_PHASES;

/// Flat values of a variable set or constraint
pub type Values = Vec<f64, MAX_ROWS>;

/// Bounds of a variable set or constraint, one pair per row
pub type BoundList = Vec<Bounds, MAX_ROWS>;

/// Lower/upper bound pair for one row
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
}

impl Bounds {
    /// Create a bound pair
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Bound pair pinning a row to exactly `value`
    pub const fn equality(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Check if a value satisfies the bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if the pair describes an equality
    pub fn is_equality(&self) -> bool {
        self.lower == self.upper
    }
}

/// Anything that reports per-row bounds to the solver
pub trait Bounded {
    /// Bounds in row order
    fn bounds(&self) -> BoundList;
}

/// A set of optimization variables
///
/// The solver reads the current values and bounds through this trait.
/// Writing a new vector goes through [`crate::Problem::set_variables`], which
/// also refreshes everything that depends on the values.
pub trait Variable: Bounded {
    /// Unique name of the variable set
    fn name(&self) -> &str;

    /// Current values in row order
    fn values(&self) -> Values;

    /// Number of scalar variables in the set
    fn rows(&self) -> usize {
        self.values().len()
    }
}
