//! Variable collection and solver entry point
//!
//! [`Variables`] holds one contact schedule per end-effector and is what
//! constraints read from. [`Problem`] adds the observer registry and is
//! the only place where new duration vectors enter the system.

use heapless::Vec;

use crate::error::{Error, InvalidArgument, NotFound};
use crate::jacobian::Jacobian;
use crate::schedule::{ContactSchedule, EndeffectorId, ObserverId, ObserverRegistry};
use crate::traits::{PhaseObserver, Values, Variable};

/// Maximum schedules (end-effectors) per problem
pub const MAX_SCHEDULES: usize = 8;

/// Contact schedules addressed by variable set name or end-effector
#[derive(Debug, Clone, Default)]
pub struct Variables {
    schedules: Vec<ContactSchedule, MAX_SCHEDULES>,
}

impl Variables {
    /// Create an empty collection
    pub const fn new() -> Self {
        Self {
            schedules: Vec::new(),
        }
    }

    /// Add a schedule; each end-effector may appear only once
    pub fn add(&mut self, schedule: ContactSchedule) -> Result<(), Error> {
        if self.schedule(schedule.ee()).is_some() {
            return Err(InvalidArgument::DuplicateEndeffector(schedule.ee()).into());
        }
        self.schedules
            .push(schedule)
            .map_err(|_| Error::CapacityExceeded)
    }

    /// Number of schedules
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Look up a schedule by variable set name
    pub fn get(&self, name: &str) -> Option<&ContactSchedule> {
        self.schedules.iter().find(|s| s.name() == name)
    }

    /// Mutable lookup by variable set name
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ContactSchedule> {
        self.schedules.iter_mut().find(|s| s.name() == name)
    }

    /// Look up the schedule of an end-effector
    pub fn schedule(&self, ee: EndeffectorId) -> Option<&ContactSchedule> {
        self.schedules.iter().find(|s| s.ee() == ee)
    }

    fn schedule_mut(&mut self, ee: EndeffectorId) -> Option<&mut ContactSchedule> {
        self.schedules.iter_mut().find(|s| s.ee() == ee)
    }

    /// Iterate all schedules in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ContactSchedule> {
        self.schedules.iter()
    }
}

/// Schedules plus the phase-based nodes that depend on them
///
/// Generic over the observer type so the registry needs no heap allocation.
/// Use an enum when several kinds of nodes share one problem.
#[derive(Debug)]
pub struct Problem<O> {
    variables: Variables,
    observers: ObserverRegistry<O>,
}

impl<O: PhaseObserver> Problem<O> {
    /// Wrap a variable collection with an empty observer registry
    pub fn new(variables: Variables) -> Self {
        Self {
            variables,
            observers: ObserverRegistry::new(),
        }
    }

    /// Shared view of the variables, as handed to constraints
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Observer registry
    pub fn observers(&self) -> &ObserverRegistry<O> {
        &self.observers
    }

    /// Borrow an observer
    pub fn observer(&self, id: ObserverId) -> Option<&O> {
        self.observers.get(id)
    }

    /// Store a new observer and register it with the schedule of `ee`
    ///
    /// The observer is synchronised with the current durations before this
    /// returns.
    pub fn add_observer(&mut self, ee: EndeffectorId, observer: O) -> Result<ObserverId, Error> {
        let schedule = self
            .variables
            .schedule_mut(ee)
            .ok_or(NotFound::Endeffector(ee))?;
        let id = self.observers.insert(observer)?;
        schedule.add_observer(id)?;

        if let Some(observer) = self.observers.get_mut(id) {
            observer.on_timings_changed(schedule);
        }
        Ok(id)
    }

    /// Register an already stored observer with the schedule of `ee`
    ///
    /// Registering a handle the schedule already has is allowed; it is then
    /// notified once per registration. The observer is synchronised with
    /// this schedule before this returns.
    pub fn attach_observer(&mut self, ee: EndeffectorId, id: ObserverId) -> Result<(), Error> {
        if self.observers.get(id).is_none() {
            return Err(NotFound::Observer.into());
        }
        let schedule = self
            .variables
            .schedule_mut(ee)
            .ok_or(NotFound::Endeffector(ee))?;
        schedule.add_observer(id)?;

        if let Some(observer) = self.observers.get_mut(id) {
            observer.on_timings_changed(schedule);
        }
        Ok(())
    }

    /// Current values of a variable set
    pub fn values(&self, var_set: &str) -> Result<Values, Error> {
        self.variables
            .get(var_set)
            .map(|s| s.values())
            .ok_or(NotFound::VariableSet.into())
    }

    /// Write a new vector into a variable set
    ///
    /// Observers of that schedule have recomputed by the time this returns.
    pub fn set_variables(&mut self, var_set: &str, x: &[f64]) -> Result<(), Error> {
        let schedule = self
            .variables
            .get_mut(var_set)
            .ok_or(NotFound::VariableSet)?;
        schedule.set_variables(x, &mut self.observers)
    }

    /// Sensitivity of an observer's position to the durations of `ee`
    pub fn jacobian_of_pos(
        &self,
        ee: EndeffectorId,
        t_global: f64,
        observer_name: &str,
    ) -> Result<Jacobian, Error> {
        self.variables
            .schedule(ee)
            .ok_or(NotFound::Endeffector(ee))?
            .jacobian_of_pos(t_global, observer_name, &self.observers)
    }
}
