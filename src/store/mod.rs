//! In-memory registry of rooms keyed by `room_no`.
//!
//! The store is an owned value constructed once at startup and passed by
//! reference to whatever needs it. Iteration follows insertion order so that
//! persisting is deterministic.

mod query;

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{Hour, Room};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Room {0} not found")]
    NotFound(String),

    #[error("Room {0} already exists")]
    AlreadyExists(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomStore {
    rooms: Vec<Room>,
    index: HashMap<String, usize>,
}

impl RoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a room with every slot free. Returns `false` without touching
    /// the store if `room_no` is already taken.
    pub fn create(&mut self, room_no: &str, building: &str, capacity: u32) -> bool {
        self.insert(Room::new(room_no, building, capacity)).is_ok()
    }

    /// Inserts a fully formed room, e.g. one decoded from disk.
    pub fn insert(&mut self, room: Room) -> Result<(), StoreError> {
        if self.index.contains_key(&room.room_no) {
            return Err(StoreError::AlreadyExists(room.room_no));
        }
        tracing::debug!(room_no = %room.room_no, "Room added");
        self.index.insert(room.room_no.clone(), self.rooms.len());
        self.rooms.push(room);
        Ok(())
    }

    pub fn exists(&self, room_no: &str) -> bool {
        self.index.contains_key(room_no)
    }

    pub fn get(&self, room_no: &str) -> Result<&Room, StoreError> {
        self.index
            .get(room_no)
            .map(|&i| &self.rooms[i])
            .ok_or_else(|| StoreError::NotFound(room_no.to_string()))
    }

    /// Books a single slot. `Ok(true)` if the slot was free and is now taken,
    /// `Ok(false)` if it was already booked.
    pub fn book(&mut self, room_no: &str, hour: Hour) -> Result<bool, StoreError> {
        let i = *self
            .index
            .get(room_no)
            .ok_or_else(|| StoreError::NotFound(room_no.to_string()))?;
        let booked = self.rooms[i].book(hour);
        tracing::debug!(room_no, %hour, booked, "Booking attempted");
        Ok(booked)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms in store order as a pretty-printed JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.rooms)
    }
}
