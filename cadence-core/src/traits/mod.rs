//! Optimization and observer interfaces
//!
//! These traits define the seams between the contact schedule and the
//! solver infrastructure that drives it, plus the phase-based nodes that
//! depend on its timings.

pub mod constraint;
pub mod observer;
pub mod variable;

pub use constraint::{Constraint, Differentiable};
pub use observer::PhaseObserver;
pub use variable::{BoundList, Bounded, Bounds, Values, Variable, MAX_ROWS};
