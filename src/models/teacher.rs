//! Teacher model.
//!
//! A teacher delivers lessons either physically at school or remotely from
//! home. Location changes during a day cost travel time, measured in free
//! slots between two bookings.

use serde::{Deserialize, Serialize};

use super::TeacherId;

/// A teacher and their placement preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Arena identifier (assigned by the registry).
    pub id: TeacherId,
    /// Display name.
    pub name: String,
    /// May be physically on-site (required for OFFLINE slots).
    pub can_offline: bool,
    /// Tolerates idle gaps between lessons within a day.
    pub wants_windows: bool,
    /// Minimum number of free slots required to change physical location.
    pub travel_time: usize,
    /// How many remote lessons may be delivered from school before
    /// each further one is penalized.
    pub max_online_from_school: u32,
}

impl Teacher {
    /// Creates a teacher with default preferences.
    ///
    /// Defaults: can work on-site, dislikes windows, travel time 2,
    /// at most 2 remote lessons delivered from school.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TeacherId(0),
            name: name.into(),
            can_offline: true,
            wants_windows: false,
            travel_time: 2,
            max_online_from_school: 2,
        }
    }

    /// Sets whether the teacher may work on-site.
    pub fn with_can_offline(mut self, can_offline: bool) -> Self {
        self.can_offline = can_offline;
        self
    }

    /// Sets whether idle windows are acceptable.
    pub fn with_wants_windows(mut self, wants_windows: bool) -> Self {
        self.wants_windows = wants_windows;
        self
    }

    /// Sets the travel time in slots.
    pub fn with_travel_time(mut self, travel_time: usize) -> Self {
        self.travel_time = travel_time;
        self
    }

    /// Sets the remote-from-school threshold.
    pub fn with_max_online_from_school(mut self, max: u32) -> Self {
        self.max_online_from_school = max;
        self
    }
}
