//! Domain models for roombook.
//!
//! # Core Concepts
//!
//! - [`Room`]: A bookable space with a unique `room_no`, a building, a capacity
//!   and one booking flag per hour of the day.
//! - [`Hour`]: A validated slot index in `0..24`. Slot `h` covers `[h:00, h+1:00)`.
//!
//! Rooms are only ever mutated through [`crate::store::RoomStore`]; a booked
//! slot is never released again.

mod hour;
mod room;

pub use hour::*;
pub use room::*;
