//! Contact phase schedules
//!
//! A schedule stores one limb's alternating stance/swing timeline as tunable
//! phase durations and exposes them to the solver as a variable set.

pub mod contact;
pub mod registry;
pub mod timeline;

use core::fmt::Write;

use heapless::String;

pub use contact::ContactSchedule;
pub use registry::{ObserverId, ObserverRegistry, MAX_OBSERVERS};
pub use timeline::{Phase, PhaseTimeline, JUNCTION_EPS, MAX_PHASES};

/// End-effector (limb) identifier
pub type EndeffectorId = u8;

/// Maximum length of variable set and constraint names
pub const MAX_NAME_LEN: usize = 24;

/// Variable set name of the schedule belonging to `ee`
pub fn schedule_name(ee: EndeffectorId) -> String<MAX_NAME_LEN> {
    let mut name = String::new();
    // Longest possible name is "ee-schedule-255"
    let _ = write!(name, "ee-schedule-{}", ee);
    name
}
