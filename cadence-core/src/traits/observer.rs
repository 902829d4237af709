//! Phase observer trait

use crate::schedule::ContactSchedule;

/// A phase-based node that depends on a contact schedule's timings
///
/// Observers are owned by the [`crate::schedule::ObserverRegistry`] of the
/// enclosing problem; schedules only keep handles to them.
pub trait PhaseObserver {
    /// Name used to address this observer in sensitivity queries
    fn name(&self) -> &str;

    /// Recompute cached phase-relative data after the timings changed
    ///
    /// Called synchronously, in registration order, every time new
    /// durations are written. Pull whatever is needed through the
    /// schedule's read accessors (`time_per_phase`, `contact_sequence`).
    fn on_timings_changed(&mut self, schedule: &ContactSchedule);

    /// Derivative of the observed position with respect to the local
    /// (phase-relative) time coordinate at `t_global`
    fn local_velocity(&self, t_global: f64) -> f64;
}
