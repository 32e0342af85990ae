//! The operations offered from the main menu.
//!
//! The prompting operations run inside [`Console::retrying`], so a
//! recoverable failure anywhere restarts the operation from its first
//! prompt. Save and Exit only report a failed write.

use std::io::{BufRead, Write};

use crate::db::{BookingsFile, PersistError};
use crate::store::RoomStore;

use super::prompt::{parse_hour, parse_number, parse_option};
use super::{render, Console, ConsoleError, Failure, Outcome, SearchMode};

/// State shared by every operation for the lifetime of the loop.
#[derive(Debug)]
pub struct Session {
    store: RoomStore,
    file: BookingsFile,
    running: bool,
}

impl Session {
    pub fn new(store: RoomStore, file: BookingsFile) -> Self {
        Self {
            store,
            file,
            running: true,
        }
    }

    /// Loads the store from `file`.
    pub fn open(file: BookingsFile) -> Result<Self, PersistError> {
        let store = file.load()?;
        Ok(Self::new(store, file))
    }

    pub fn store(&self) -> &RoomStore {
        &self.store
    }

    pub fn file(&self) -> &BookingsFile {
        &self.file
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

fn free_text(raw: &str) -> Result<String, Failure> {
    Ok(raw.to_string())
}

pub fn view<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Outcome<()>, ConsoleError> {
    console.retrying(|c| {
        let room_no = c.ask("Room number: ", free_text)?;
        let room = session.store.get(&room_no)?;
        c.say(render::room_table(room))?;
        Ok(())
    })
}

pub fn book<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Outcome<()>, ConsoleError> {
    console.retrying(|c| {
        let room_no = c.ask("Room number: ", free_text)?;
        let room = session.store.get(&room_no)?;
        c.say(render::room_table(room))?;

        let hour = c.ask("Hour to book (0-23): ", parse_hour)?;
        if !session.store.book(&room_no, hour)? {
            return Err(Failure::SlotConflict { room_no, hour }.into());
        }
        c.say(format!("Room {} booked for {}.", room_no, hour.label()))?;
        Ok(())
    })
}

pub fn create<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Outcome<()>, ConsoleError> {
    console.retrying(|c| {
        let room_no = c.ask("Room number: ", free_text)?;
        if session.store.exists(&room_no) {
            return Err(Failure::AlreadyExists(room_no).into());
        }
        let building = c.ask("Building: ", free_text)?;
        let capacity = c.ask("Capacity: ", parse_number)?;

        session.store.create(&room_no, &building, capacity);
        c.say(format!("Room {} created.", room_no))?;
        Ok(())
    })
}

pub fn find<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Outcome<()>, ConsoleError> {
    console.retrying(|c| {
        c.say(render::menu::<SearchMode>("Find rooms"))?;
        let mode = c.ask("Select a search: ", parse_option::<SearchMode>)?;

        let rooms = match mode {
            SearchMode::Building => {
                let name = c.ask("Building: ", free_text)?;
                session.store.by_building(&name)
            }
            SearchMode::Capacity => {
                let min = c.ask("Minimum capacity: ", parse_number)?;
                session.store.by_capacity(min)
            }
            SearchMode::Hour => {
                let hour = c.ask("Free at hour (0-23): ", parse_hour)?;
                session.store.by_hour(hour)
            }
            SearchMode::Return => return Ok(()),
        };
        tracing::debug!(?mode, matches = rooms.len(), "Search finished");
        c.say(render::room_list(&rooms))?;
        Ok(())
    })
}

/// Writes the store to disk. A failure is reported and not retried.
fn persist<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
) -> Result<Outcome<()>, ConsoleError> {
    match session.file.save(&session.store) {
        Ok(()) => Ok(Outcome::Done(())),
        Err(e) => {
            tracing::error!("{}", e);
            console.report(&e)?;
            Ok(Outcome::Aborted)
        }
    }
}

/// Writes the store to disk and stays in the loop.
pub fn save<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Outcome<()>, ConsoleError> {
    let outcome = persist(session, console)?;
    if outcome == Outcome::Done(()) {
        console.say(format!(
            "Saved {} room(s) to {}.",
            session.store.len(),
            session.file.path().display()
        ))?;
    }
    Ok(outcome)
}

/// Writes the store to disk and ends the loop. A failed write keeps the loop
/// running so nothing is lost.
pub fn exit<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<Outcome<()>, ConsoleError> {
    let outcome = persist(session, console)?;
    if outcome == Outcome::Done(()) {
        session.running = false;
        console.say("Bookings saved. Goodbye.")?;
    }
    Ok(outcome)
}
