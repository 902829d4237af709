//! Phase timeline and global-time lookup

use heapless::Vec;

use crate::error::{Error, InvalidArgument};

/// Maximum phases per schedule
pub const MAX_PHASES: usize = 32;

/// Tolerance used when a sample lands on a phase junction
pub const JUNCTION_EPS: f64 = 1e-10;

/// One interval of constant contact state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase {
    duration: f64,
    in_contact: bool,
}

impl Phase {
    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Whether the limb touches the ground during this phase
    pub fn in_contact(&self) -> bool {
        self.in_contact
    }
}

/// Ordered phases with strictly alternating contact flags
///
/// The number of phases is fixed at construction; only durations change.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTimeline {
    phases: Vec<Phase, MAX_PHASES>,
}

impl PhaseTimeline {
    /// Build a timeline, alternating contact flags from `first_phase_in_contact`
    ///
    /// Every duration must be positive and finite.
    pub fn new(durations: &[f64], first_phase_in_contact: bool) -> Result<Self, Error> {
        if durations.is_empty() {
            return Err(InvalidArgument::EmptyTimeline.into());
        }

        let mut phases = Vec::new();
        let mut in_contact = first_phase_in_contact;
        for &duration in durations {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(InvalidArgument::InvalidDuration.into());
            }
            phases
                .push(Phase {
                    duration,
                    in_contact,
                })
                .map_err(|_| Error::CapacityExceeded)?;
            in_contact = !in_contact;
        }

        Ok(Self { phases })
    }

    /// Number of phases (never zero)
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phases in order
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Durations in phase order
    pub fn durations(&self) -> Vec<f64, MAX_PHASES> {
        self.phases.iter().map(|p| p.duration).collect()
    }

    /// Contact flags in phase order
    pub fn contact_sequence(&self) -> Vec<bool, MAX_PHASES> {
        self.phases.iter().map(|p| p.in_contact).collect()
    }

    /// Replace every duration in order
    ///
    /// Fails without touching the timeline if the length does not match.
    pub fn set_durations(&mut self, durations: &[f64]) -> Result<(), Error> {
        if durations.len() != self.phases.len() {
            return Err(InvalidArgument::LengthMismatch {
                expected: self.phases.len(),
                actual: durations.len(),
            }
            .into());
        }

        for (phase, &duration) in self.phases.iter_mut().zip(durations) {
            phase.duration = duration;
        }
        Ok(())
    }

    /// Sum of all current durations
    pub fn total_duration(&self) -> f64 {
        self.phases.iter().map(|p| p.duration).sum()
    }

    /// Contact flag of one phase
    pub fn contact(&self, phase: usize) -> Result<bool, Error> {
        self.phases
            .get(phase)
            .map(|p| p.in_contact)
            .ok_or(Error::OutOfRange {
                index: phase,
                count: self.phases.len(),
            })
    }

    /// Duration of one phase
    pub fn duration(&self, phase: usize) -> Result<f64, Error> {
        self.phases
            .get(phase)
            .map(|p| p.duration)
            .ok_or(Error::OutOfRange {
                index: phase,
                count: self.phases.len(),
            })
    }

    /// Global start time of every phase
    pub fn start_times(&self) -> Vec<f64, MAX_PHASES> {
        let mut t = 0.0;
        self.phases
            .iter()
            .map(|p| {
                let start = t;
                t += p.duration;
                start
            })
            .collect()
    }

    /// Locate the phase active at `t_global`
    ///
    /// Returns the phase index and the time elapsed since that phase
    /// started, clamped to `[0, duration]`. The first phase whose end time
    /// reaches `t_global` wins, so a sample on a junction belongs to the
    /// phase ending there. Samples before zero map to the first phase and
    /// samples past the end map to the last.
    pub fn phase_at(&self, t_global: f64) -> (usize, f64) {
        if t_global <= 0.0 {
            return (0, 0.0);
        }

        let mut t_start = 0.0;
        for (i, phase) in self.phases.iter().enumerate() {
            let t_end = t_start + phase.duration;
            if t_end >= t_global - JUNCTION_EPS {
                let t_local = (t_global - t_start).clamp(0.0, phase.duration.max(0.0));
                return (i, t_local);
            }
            t_start = t_end;
        }

        let last = self.phases.len() - 1;
        (last, self.phases[last].duration.max(0.0))
    }

    /// Contact flag of the phase active at `t_global`
    pub fn is_in_contact(&self, t_global: f64) -> bool {
        let (phase, _) = self.phase_at(t_global);
        self.phases[phase].in_contact
    }
}
