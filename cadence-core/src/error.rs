//! Error types for schedule, constraint and configuration operations

use core::fmt;

use crate::schedule::EndeffectorId;

/// Errors that can occur when building or querying contact schedules
///
/// All variants describe setup or caller mistakes. Nothing here is
/// transient, so callers are expected to surface them rather than retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An argument was rejected
    InvalidArgument(InvalidArgument),
    /// Index outside the valid range `0..count`
    OutOfRange { index: usize, count: usize },
    /// A named item could not be resolved
    NotFound(NotFound),
    /// Fixed-capacity storage is full
    CapacityExceeded,
    /// Configuration could not be decoded
    Config,
}

/// Reason an argument was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidArgument {
    /// Vector length does not match the number of phases
    LengthMismatch { expected: usize, actual: usize },
    /// A schedule needs at least one phase
    EmptyTimeline,
    /// Phase duration is zero, negative or not finite
    InvalidDuration,
    /// Lower duration bound is above the upper bound
    InvertedBounds,
    /// A schedule for this end-effector already exists
    DuplicateEndeffector(EndeffectorId),
}

/// Kind of item that could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotFound {
    /// No observer with the requested name is registered with the schedule
    Observer,
    /// No schedule exists for the end-effector
    Endeffector(EndeffectorId),
    /// No variable set with the requested name
    VariableSet,
}

impl From<InvalidArgument> for Error {
    fn from(e: InvalidArgument) -> Self {
        Error::InvalidArgument(e)
    }
}

impl From<NotFound> for Error {
    fn from(e: NotFound) -> Self {
        Error::NotFound(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            Error::OutOfRange { index, count } => {
                write!(f, "index {} out of range for {} entries", index, count)
            }
            Error::NotFound(what) => write!(f, "not found: {}", what),
            Error::CapacityExceeded => f.write_str("capacity exceeded"),
            Error::Config => f.write_str("invalid configuration"),
        }
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidArgument::LengthMismatch { expected, actual } => {
                write!(f, "expected {} values, got {}", expected, actual)
            }
            InvalidArgument::EmptyTimeline => f.write_str("schedule has no phases"),
            InvalidArgument::InvalidDuration => f.write_str("phase duration must be positive"),
            InvalidArgument::InvertedBounds => f.write_str("minimum duration exceeds maximum"),
            InvalidArgument::DuplicateEndeffector(ee) => {
                write!(f, "end-effector {} already has a schedule", ee)
            }
        }
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFound::Observer => f.write_str("observer"),
            NotFound::Endeffector(ee) => write!(f, "schedule for end-effector {}", ee),
            NotFound::VariableSet => f.write_str("variable set"),
        }
    }
}
