//! Contact phase schedules for legged-robot trajectory optimization
//!
//! This crate models the stance/swing timeline of each limb as a set of
//! tunable phase durations and exposes it to a nonlinear-programming solver:
//!
//! - Phase timeline with global-time lookup
//! - Contact schedule optimization variable (values, bounds, contact queries)
//! - Observer registry for phase-based nodes that cache timing data
//! - Position sensitivity with respect to phase durations
//! - Total duration equality constraint with an exact Jacobian
//! - Gait setup configuration (TOML, postcard)
//!
//! No heap allocation is needed; every collection has a fixed capacity.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod constraint;
pub mod error;
pub mod jacobian;
pub mod problem;
pub mod schedule;
pub mod traits;

#[cfg(test)]
mod testing;

pub use constraint::DurationConstraint;
pub use error::{Error, InvalidArgument, NotFound};
pub use jacobian::Jacobian;
pub use problem::{Problem, Variables};
pub use schedule::{ContactSchedule, EndeffectorId, ObserverId, ObserverRegistry, PhaseTimeline};
