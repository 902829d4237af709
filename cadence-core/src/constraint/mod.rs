//! Constraints over contact schedules

pub mod duration;

pub use duration::DurationConstraint;
