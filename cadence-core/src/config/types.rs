//! Gait setup type definitions

use heapless::Vec;

use crate::constraint::DurationConstraint;
use crate::error::{Error, InvalidArgument};
use crate::problem::{Problem, Variables, MAX_SCHEDULES};
use crate::schedule::{ContactSchedule, EndeffectorId, MAX_PHASES};
use crate::traits::PhaseObserver;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Default lower bound on any phase duration (seconds)
pub const DEFAULT_MIN_PHASE_DURATION: f64 = 0.1;

/// Default upper bound on any phase duration (seconds)
pub const DEFAULT_MAX_PHASE_DURATION: f64 = 2.0;

#[cfg(feature = "serde")]
fn default_version() -> u8 {
    CONFIG_VERSION
}

#[cfg(feature = "serde")]
fn default_min_phase_duration() -> f64 {
    DEFAULT_MIN_PHASE_DURATION
}

#[cfg(feature = "serde")]
fn default_max_phase_duration() -> f64 {
    DEFAULT_MAX_PHASE_DURATION
}

/// Initial guess and bounds for one end-effector
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleConfig {
    /// End-effector identifier
    pub ee: EndeffectorId,
    /// Contact state of the first phase
    pub first_phase_in_contact: bool,
    /// Initial duration of every phase (seconds)
    pub durations: Vec<f64, MAX_PHASES>,
    /// Lower bound for every phase duration
    #[cfg_attr(feature = "serde", serde(default = "default_min_phase_duration"))]
    pub min_phase_duration: f64,
    /// Upper bound for every phase duration
    #[cfg_attr(feature = "serde", serde(default = "default_max_phase_duration"))]
    pub max_phase_duration: f64,
}

impl ScheduleConfig {
    /// Create a schedule setup with default bounds
    pub fn new(
        ee: EndeffectorId,
        first_phase_in_contact: bool,
        durations: &[f64],
    ) -> Result<Self, Error> {
        Ok(Self {
            ee,
            first_phase_in_contact,
            durations: Vec::from_slice(durations).map_err(|_| Error::CapacityExceeded)?,
            min_phase_duration: DEFAULT_MIN_PHASE_DURATION,
            max_phase_duration: DEFAULT_MAX_PHASE_DURATION,
        })
    }

    /// Check the setup before building a schedule from it
    pub fn validate(&self) -> Result<(), Error> {
        if self.durations.is_empty() {
            return Err(InvalidArgument::EmptyTimeline.into());
        }
        if self.durations.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(InvalidArgument::InvalidDuration.into());
        }
        if self.min_phase_duration > self.max_phase_duration {
            return Err(InvalidArgument::InvertedBounds.into());
        }
        Ok(())
    }

    /// Build the schedule variable
    pub fn build(&self, t_total: f64) -> Result<ContactSchedule, Error> {
        self.validate()?;
        ContactSchedule::new(
            self.ee,
            t_total,
            &self.durations,
            self.first_phase_in_contact,
            self.min_phase_duration,
            self.max_phase_duration,
        )
    }
}

/// Complete gait setup: one schedule per end-effector
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaitConfig {
    /// Configuration version for compatibility checks
    #[cfg_attr(feature = "serde", serde(default = "default_version"))]
    pub version: u8,
    /// Total motion time every schedule must add up to (seconds)
    pub total_time: f64,
    /// Per end-effector schedules
    pub schedules: Vec<ScheduleConfig, MAX_SCHEDULES>,
}

impl GaitConfig {
    /// Create an empty setup
    pub fn new(total_time: f64) -> Self {
        Self {
            version: CONFIG_VERSION,
            total_time,
            schedules: Vec::new(),
        }
    }

    /// Append a schedule setup
    pub fn push(&mut self, schedule: ScheduleConfig) -> Result<(), Error> {
        self.schedules
            .push(schedule)
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Check version, total time and every schedule
    pub fn validate(&self) -> Result<(), Error> {
        if self.version != CONFIG_VERSION {
            return Err(Error::Config);
        }
        if !self.total_time.is_finite() || self.total_time <= 0.0 {
            return Err(InvalidArgument::InvalidDuration.into());
        }
        for (i, schedule) in self.schedules.iter().enumerate() {
            schedule.validate()?;
            if self.schedules[..i].iter().any(|s| s.ee == schedule.ee) {
                return Err(InvalidArgument::DuplicateEndeffector(schedule.ee).into());
            }
        }
        Ok(())
    }

    /// Build the variable collection
    pub fn build_variables(&self) -> Result<Variables, Error> {
        self.validate()?;
        let mut vars = Variables::new();
        for schedule in &self.schedules {
            vars.add(schedule.build(self.total_time)?)?;
        }
        Ok(vars)
    }

    /// Build a problem with an empty observer registry
    pub fn build_problem<O: PhaseObserver>(&self) -> Result<Problem<O>, Error> {
        Ok(Problem::new(self.build_variables()?))
    }

    /// One duration constraint per configured schedule
    pub fn duration_constraints(
        &self,
        vars: &Variables,
    ) -> Result<Vec<DurationConstraint, MAX_SCHEDULES>, Error> {
        let mut constraints = Vec::new();
        for schedule in &self.schedules {
            constraints
                .push(DurationConstraint::new(vars, self.total_time, schedule.ee)?)
                .map_err(|_| Error::CapacityExceeded)?;
        }
        Ok(constraints)
    }
}
