//! Test observers shared by the unit tests

use core::sync::atomic::{AtomicUsize, Ordering};

use heapless::Vec;

use crate::schedule::{ContactSchedule, PhaseTimeline, MAX_PHASES};
use crate::traits::PhaseObserver;

static NOTIFICATIONS: AtomicUsize = AtomicUsize::new(0);

/// Observer that records how and when it was notified
#[derive(Debug)]
pub struct Recorder {
    name: &'static str,
    pub updates: usize,
    /// Global notification counter value at the last update
    pub sequence: usize,
    pub last_durations: Vec<f64, MAX_PHASES>,
}

impl Recorder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            updates: 0,
            sequence: 0,
            last_durations: Vec::new(),
        }
    }
}

impl PhaseObserver for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn on_timings_changed(&mut self, schedule: &ContactSchedule) {
        self.updates += 1;
        self.sequence = NOTIFICATIONS.fetch_add(1, Ordering::SeqCst);
        self.last_durations = schedule.time_per_phase();
    }

    fn local_velocity(&self, _t_global: f64) -> f64 {
        0.0
    }
}

/// Piecewise-linear trajectory with one node at every phase junction
///
/// Node values stay fixed while durations change, so moving a junction
/// stretches the neighbouring segments.
#[derive(Debug)]
pub struct LinearNodes {
    name: &'static str,
    nodes: Vec<f64, { MAX_PHASES + 1 }>,
    timeline: Option<PhaseTimeline>,
}

impl LinearNodes {
    pub fn new(name: &'static str, nodes: &[f64]) -> Self {
        Self {
            name,
            nodes: Vec::from_slice(nodes).unwrap(),
            timeline: None,
        }
    }

    /// Position at `t_global` under the last received timings
    pub fn position(&self, t_global: f64) -> f64 {
        let timeline = self.timeline.as_ref().unwrap();
        let (phase, t_local) = timeline.phase_at(t_global);
        let duration = timeline.duration(phase).unwrap();
        let start = self.nodes[phase];
        let end = self.nodes[phase + 1];
        start + (end - start) * t_local / duration
    }
}

impl PhaseObserver for LinearNodes {
    fn name(&self) -> &str {
        self.name
    }

    fn on_timings_changed(&mut self, schedule: &ContactSchedule) {
        let durations = schedule.time_per_phase();
        self.timeline = PhaseTimeline::new(&durations, true).ok();
    }

    fn local_velocity(&self, t_global: f64) -> f64 {
        let Some(timeline) = self.timeline.as_ref() else {
            return 0.0;
        };
        let (phase, _) = timeline.phase_at(t_global);
        let duration = timeline.duration(phase).unwrap_or(1.0);
        (self.nodes[phase + 1] - self.nodes[phase]) / duration
    }
}
