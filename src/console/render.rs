//! Plain-text rendering of rooms and menus.

use crate::models::{Hour, Room};

use super::MenuOption;

const BOOKED: char = '■';
const AVAILABLE: char = '□';

/// Render a room's identity followed by its day of slots.
///
/// Example output:
/// ```text
/// Room 101 | Main Hall | capacity 50
///   00:00-01:00  □ available
///   01:00-02:00  ■ booked
///   ...
/// ```
pub fn room_table(room: &Room) -> String {
    let mut output = format!(
        "Room {} | {} | capacity {}\n",
        room.room_no, room.building, room.capacity
    );
    for hour in Hour::all() {
        let (symbol, state) = if room.is_booked(hour) {
            (BOOKED, "booked")
        } else {
            (AVAILABLE, "available")
        };
        output.push_str(&format!("  {}  {} {}\n", hour.label(), symbol, state));
    }
    output
}

/// Render the identifiers of matching rooms, or say that nothing matched.
pub fn room_list(rooms: &[&Room]) -> String {
    if rooms.is_empty() {
        return "No rooms found.\n".to_string();
    }
    let mut output = format!("{} room(s) found:\n", rooms.len());
    for room in rooms {
        output.push_str(&format!("  {}\n", room.room_no));
    }
    output
}

pub fn menu<T: MenuOption>(title: &str) -> String {
    let mut output = format!("{}\n", title);
    for option in T::all() {
        output.push_str(&format!("  {}. {}\n", option.number(), option.label()));
    }
    output
}
