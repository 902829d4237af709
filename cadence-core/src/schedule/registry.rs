//! Registry of phase observers
//!
//! The enclosing problem owns every observer here. Schedules refer to them
//! through [`ObserverId`] handles, so there is no ownership cycle between a
//! schedule and the nodes that read it.

use heapless::Vec;

use crate::error::Error;
use crate::traits::PhaseObserver;

/// Maximum observers per registry
pub const MAX_OBSERVERS: usize = 16;

/// Handle to an observer stored in an [`ObserverRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObserverId(u8);

impl ObserverId {
    /// Slot index inside the registry
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owning storage for phase observers
#[derive(Debug)]
pub struct ObserverRegistry<O> {
    observers: Vec<O, MAX_OBSERVERS>,
}

impl<O> Default for ObserverRegistry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> ObserverRegistry<O> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Number of stored observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if no observer is stored
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Borrow an observer
    pub fn get(&self, id: ObserverId) -> Option<&O> {
        self.observers.get(id.index())
    }

    /// Mutably borrow an observer
    pub fn get_mut(&mut self, id: ObserverId) -> Option<&mut O> {
        self.observers.get_mut(id.index())
    }

    /// Iterate observers with their handles
    pub fn iter(&self) -> impl Iterator<Item = (ObserverId, &O)> {
        self.observers
            .iter()
            .enumerate()
            .map(|(i, o)| (ObserverId(i as u8), o))
    }
}

impl<O: PhaseObserver> ObserverRegistry<O> {
    /// Store an observer and return its handle
    pub fn insert(&mut self, observer: O) -> Result<ObserverId, Error> {
        let id = ObserverId(self.observers.len() as u8);
        self.observers
            .push(observer)
            .map_err(|_| Error::CapacityExceeded)?;
        Ok(id)
    }

    /// Find the handle of the first observer called `name`
    pub fn find(&self, name: &str) -> Option<ObserverId> {
        self.iter().find(|(_, o)| o.name() == name).map(|(id, _)| id)
    }
}
