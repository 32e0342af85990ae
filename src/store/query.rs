//! Read-only filters over the store.
//!
//! Each filter yields rooms in store order; a room appears at most once.

use crate::models::{Hour, Room};

use super::RoomStore;

impl RoomStore {
    /// Rooms whose building matches `name`, ignoring case.
    pub fn by_building(&self, name: &str) -> Vec<&Room> {
        let needle = name.to_lowercase();
        self.iter()
            .filter(|room| room.building.to_lowercase() == needle)
            .collect()
    }

    /// Rooms holding at least `min` people.
    pub fn by_capacity(&self, min: u32) -> Vec<&Room> {
        self.iter().filter(|room| room.capacity >= min).collect()
    }

    /// Rooms whose slot `hour` is still free.
    pub fn by_hour(&self, hour: Hour) -> Vec<&Room> {
        self.iter().filter(|room| room.is_free(hour)).collect()
    }
}
