use std::io::{BufRead, Write};

use super::operations::{self, Session};
use super::prompt::{parse_option, MenuOption};
use super::{render, Console, ConsoleError, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenu {
    View,
    Book,
    Create,
    Find,
    Save,
    Exit,
}

impl MenuOption for MainMenu {
    fn all() -> &'static [Self] {
        &[
            Self::View,
            Self::Book,
            Self::Create,
            Self::Find,
            Self::Save,
            Self::Exit,
        ]
    }

    fn number(self) -> u32 {
        match self {
            Self::View => 1,
            Self::Book => 2,
            Self::Create => 3,
            Self::Find => 4,
            Self::Save => 5,
            Self::Exit => 6,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::View => "View a room",
            Self::Book => "Book a room",
            Self::Create => "Create a room",
            Self::Find => "Find rooms",
            Self::Save => "Save bookings",
            Self::Exit => "Save and exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Building,
    Capacity,
    Hour,
    Return,
}

impl MenuOption for SearchMode {
    fn all() -> &'static [Self] {
        &[Self::Building, Self::Capacity, Self::Hour, Self::Return]
    }

    fn number(self) -> u32 {
        match self {
            Self::Building => 1,
            Self::Capacity => 2,
            Self::Hour => 3,
            Self::Return => 4,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Building => "By building",
            Self::Capacity => "By minimum capacity",
            Self::Hour => "By free hour",
            Self::Return => "Return to main menu",
        }
    }
}

/// Presents the main menu and dispatches until Exit succeeds.
///
/// An unknown selection is reported and the menu shown again. Only console
/// faults end the loop early; the store is not saved in that case.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<(), ConsoleError> {
    while session.is_running() {
        console.say(render::menu::<MainMenu>("Room bookings"))?;
        let raw = console.prompt("Select an option: ")?;
        let choice = match parse_option::<MainMenu>(&raw) {
            Ok(choice) => choice,
            Err(failure) => {
                tracing::warn!("{}", failure);
                console.report(&failure)?;
                continue;
            }
        };

        tracing::debug!(?choice, "Dispatching");
        let outcome = match choice {
            MainMenu::View => operations::view(session, console)?,
            MainMenu::Book => operations::book(session, console)?,
            MainMenu::Create => operations::create(session, console)?,
            MainMenu::Find => operations::find(session, console)?,
            MainMenu::Save => operations::save(session, console)?,
            MainMenu::Exit => operations::exit(session, console)?,
        };
        if outcome == Outcome::Aborted {
            tracing::debug!(?choice, "Operation aborted");
        }
    }
    Ok(())
}
