//! Constraint traits

use crate::error::Error;
use crate::jacobian::Jacobian;
use crate::problem::Variables;
use crate::traits::variable::{Bounded, Values};

/// Anything that can write its derivative with respect to a variable set
pub trait Differentiable {
    /// Fill the block of the Jacobian belonging to `var_set`
    ///
    /// `jac` has one row per constraint row and one column per variable in
    /// `var_set`. Implementations that do not depend on `var_set` must leave
    /// the block untouched.
    fn fill_jacobian_block(
        &self,
        var_set: &str,
        vars: &Variables,
        jac: &mut Jacobian,
    ) -> Result<(), Error>;
}

/// A constraint evaluated against the shared variable collection
///
/// Constraints hold lookup keys into [`Variables`] rather than owning the
/// variables, so several constraints can read the same schedule.
pub trait Constraint: Bounded + Differentiable {
    /// Unique name of the constraint set
    fn name(&self) -> &str;

    /// Number of constraint rows
    fn rows(&self) -> usize;

    /// Current constraint values in row order
    fn values(&self, vars: &Variables) -> Result<Values, Error>;
}
