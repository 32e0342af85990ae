use serde::{Deserialize, Serialize};

use super::{Hour, HOURS_PER_DAY};

/// A meeting room and its booking state for one day.
///
/// `booked_hours` is a fixed array so the 24-slot invariant holds by
/// construction. A new room starts with every slot free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_no: String,
    /// Free text; queries compare it case-insensitively.
    pub building: String,
    pub capacity: u32,
    pub booked_hours: [bool; HOURS_PER_DAY],
}

impl Room {
    pub fn new(room_no: impl Into<String>, building: impl Into<String>, capacity: u32) -> Self {
        Self {
            room_no: room_no.into(),
            building: building.into(),
            capacity,
            booked_hours: [false; HOURS_PER_DAY],
        }
    }

    pub fn is_booked(&self, hour: Hour) -> bool {
        self.booked_hours[hour.index()]
    }

    pub fn is_free(&self, hour: Hour) -> bool {
        !self.is_booked(hour)
    }

    /// Marks `hour` as booked. Returns `false` and leaves the room untouched
    /// if the slot was already taken.
    pub(crate) fn book(&mut self, hour: Hour) -> bool {
        let slot = &mut self.booked_hours[hour.index()];
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    pub fn booked_count(&self) -> usize {
        self.booked_hours.iter().filter(|booked| **booked).count()
    }
}
