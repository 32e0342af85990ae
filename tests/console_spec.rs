//! Drives the interactive menu end to end with scripted input.

use std::io::Cursor;

use roombook::console::{self, operations, Console, ConsoleError, Outcome, Session};
use roombook::db::{BookingsFile, PersistError};
use roombook::models::*;
use roombook::store::RoomStore;
use speculate2::speculate;

type ScriptConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

fn script(input: &str) -> ScriptConsole {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

fn output(console: ScriptConsole) -> String {
    String::from_utf8(console.into_output()).expect("output is UTF-8")
}

/// Runs the main loop over `input` and returns its result and everything printed.
fn drive(session: &mut Session, input: &str) -> (Result<(), ConsoleError>, String) {
    let mut console = script(input);
    let result = console::run(session, &mut console);
    (result, output(console))
}

fn hour(h: u32) -> Hour {
    Hour::new(h).expect("hour in range")
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let file = BookingsFile::new(dir.path().join("bookings.csv"));
        let mut session = Session::new(RoomStore::new(), file.clone());
    }

    describe "main menu" {
        it "lists every option" {
            let (result, out) = drive(&mut session, "6\n");
            result.expect("loop should finish");

            for label in ["1. View a room", "2. Book a room", "3. Create a room", "4. Find rooms", "5. Save bookings", "6. Save and exit"] {
                assert!(out.contains(label), "missing {:?}", label);
            }
        }

        it "reports an unknown selection and shows the menu again" {
            let (result, out) = drive(&mut session, "9\nabc\n6\n");
            result.expect("loop should finish");

            assert!(out.contains("Error: \"9\" is not one of the listed options"));
            assert!(out.contains("Error: \"abc\" is not one of the listed options"));
            assert_eq!(out.matches("Room bookings").count(), 3);
            assert!(!out.contains("Press Enter"));
        }

        it "ends with an error when input runs out" {
            let (result, _) = drive(&mut session, "3\n101\n");
            assert!(matches!(result, Err(ConsoleError::InputClosed)));
            assert!(!file.exists());
        }
    }

    describe "startup" {
        it "refuses to open a session without a bookings file" {
            let err = Session::open(file.clone()).expect_err("open should fail");
            assert!(matches!(err, PersistError::NotFound(_)));
        }

        it "refuses to open a session over a malformed file" {
            std::fs::write(file.path(), "room_no,building\n").expect("Failed to write");
            let err = Session::open(file.clone()).expect_err("open should fail");
            assert!(matches!(err, PersistError::MalformedRecord { line: 1, .. }));
        }
    }

    describe "input that is not UTF-8" {
        it "is treated as bad input for the current prompt" {
            let mut input = b"3\n101\nMain Hall\n50\n1\n".to_vec();
            input.extend_from_slice(b"\xff\xfe\n\n6\n");
            let mut console = Console::new(Cursor::new(input), Vec::new());

            console::run(&mut session, &mut console).expect("loop should finish");

            assert!(!session.is_running());
            assert!(output(console).contains("was not found"));
            assert!(file.load().expect("Failed to load").exists("101"));
        }

        it "is an unknown selection at the main menu" {
            let mut console = Console::new(Cursor::new(b"\xff\n6\n".to_vec()), Vec::new());

            console::run(&mut session, &mut console).expect("loop should finish");
            assert!(output(console).contains("is not one of the listed options"));
        }
    }

    describe "exit" {
        it "saves the store and stops the loop" {
            let (result, out) = drive(&mut session, "3\n101\nMain Hall\n50\n6\n");
            result.expect("loop should finish");

            assert!(!session.is_running());
            assert!(out.contains("Goodbye"));
            let loaded = file.load().expect("Failed to load");
            assert_eq!(&loaded, session.store());
        }

        it "keeps running when the save fails" {
            let blocked = BookingsFile::new(dir.path());
            let mut session = Session::new(RoomStore::new(), blocked);

            let (result, out) = drive(&mut session, "6\n");
            assert!(matches!(result, Err(ConsoleError::InputClosed)));
            assert!(session.is_running());
            assert!(out.contains("Error: "));
        }
    }

    describe "view" {
        it "raises NotFound on an empty store and retries or returns on request" {
            let mut console = script("999\nretry\n999\n\n");
            let outcome = operations::view(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Aborted);
            let out = output(console);
            assert_eq!(out.matches("Room 999 was not found").count(), 2);
            assert_eq!(out.matches("Press Enter").count(), 2);
        }

        it "renders the room table" {
            let (result, out) = drive(&mut session, "3\n101\nMain Hall\n50\n2\n101\n9\n1\n101\n6\n");
            result.expect("loop should finish");

            assert!(out.contains("Room 101 | Main Hall | capacity 50"));
            assert!(out.contains("09:00-10:00  ■ booked"));
            assert!(out.contains("10:00-11:00  □ available"));
        }
    }

    describe "create" {
        it "creates a room with every slot free" {
            let mut console = script("101\nMain Hall\n50\n");
            let outcome = operations::create(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Done(()));
            let room = session.store().get("101").expect("room exists");
            assert_eq!(room.building, "Main Hall");
            assert_eq!(room.capacity, 50);
            assert_eq!(room.booked_count(), 0);
        }

        it "rejects an existing room number" {
            let mut console = script("101\nMain Hall\n50\n");
            operations::create(&mut session, &mut console).expect("console works");

            let mut console = script("101\n\n");
            let outcome = operations::create(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Aborted);
            assert_eq!(session.store().len(), 1);
            assert!(output(console).contains("Room 101 already exists"));
        }

        it "restarts from the room number after a bad capacity" {
            let mut console = script("101\nMain Hall\n-5\ny\n102\nAnnex\n8\n");
            let outcome = operations::create(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Done(()));
            assert!(!session.store().exists("101"));
            assert_eq!(session.store().get("102").expect("room exists").capacity, 8);
            assert!(output(console).contains("Invalid input \"-5\""));
        }
    }

    describe "book" {
        before {
            let mut console = script("101\nMain Hall\n50\n");
            operations::create(&mut session, &mut console).expect("console works");
        }

        it "books a free hour" {
            let mut console = script("101\n9\n");
            let outcome = operations::book(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Done(()));
            assert!(session.store().get("101").expect("room exists").is_booked(hour(9)));
            assert!(output(console).contains("Room 101 booked for 09:00-10:00."));
        }

        it "reports a slot conflict" {
            let mut console = script("101\n9\n");
            operations::book(&mut session, &mut console).expect("console works");

            let mut console = script("101\n9\n\n");
            let outcome = operations::book(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Aborted);
            assert!(output(console).contains("Room 101 is already booked for 09:00-10:00"));
        }

        it "rejects an hour out of range and retries" {
            let mut console = script("101\n24\nagain\n101\n23\n");
            let outcome = operations::book(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Done(()));
            let room = session.store().get("101").expect("room exists");
            assert_eq!(room.booked_count(), 1);
            assert!(room.is_booked(hour(23)));
        }

        it "reports an unknown room before asking for an hour" {
            let mut console = script("404\n\n");
            let outcome = operations::book(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Aborted);
            let out = output(console);
            assert!(out.contains("Room 404 was not found"));
            assert!(!out.contains("Hour to book"));
        }
    }

    describe "find" {
        before {
            for (room_no, building, capacity) in [("101", "Main Hall", "50"), ("102", "main hall", "8"), ("201", "Annex", "20")] {
                let mut console = script(&format!("{}\n{}\n{}\n", room_no, building, capacity));
                operations::create(&mut session, &mut console).expect("console works");
            }
            let mut console = script("101\n9\n");
            operations::book(&mut session, &mut console).expect("console works");
        }

        it "searches by building ignoring case" {
            let mut console = script("1\nMAIN HALL\n");
            operations::find(&mut session, &mut console).expect("console works");

            let out = output(console);
            assert!(out.contains("2 room(s) found:\n  101\n  102\n"));
        }

        it "searches by minimum capacity" {
            let mut console = script("2\n20\n");
            operations::find(&mut session, &mut console).expect("console works");

            assert!(output(console).contains("2 room(s) found:\n  101\n  201\n"));
        }

        it "searches by free hour" {
            let mut console = script("3\n9\n");
            operations::find(&mut session, &mut console).expect("console works");

            assert!(output(console).contains("2 room(s) found:\n  102\n  201\n"));
        }

        it "says when nothing matches" {
            let mut console = script("1\nObservatory\n");
            operations::find(&mut session, &mut console).expect("console works");

            assert!(output(console).contains("No rooms found."));
        }

        it "treats an unknown search as a retryable failure" {
            let mut console = script("7\nyes\n4\n");
            let outcome = operations::find(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Done(()));
            let out = output(console);
            assert!(out.contains("\"7\" is not one of the listed options"));
            assert!(!out.contains("room(s) found"));
        }

        it "rejects a non-numeric capacity" {
            let mut console = script("2\nten\n\n");
            let outcome = operations::find(&mut session, &mut console).expect("console works");

            assert_eq!(outcome, Outcome::Aborted);
            assert!(output(console).contains("Invalid input \"ten\""));
        }
    }

    describe "save" {
        it "writes the store without leaving the loop" {
            let (result, out) = drive(&mut session, "3\n101\nMain Hall\n50\n5\n");
            assert!(matches!(result, Err(ConsoleError::InputClosed)));
            assert!(out.contains("Saved 1 room(s)"));

            let loaded = file.load().expect("Failed to load");
            assert!(loaded.exists("101"));
        }
    }

    describe "booking scenario" {
        it "creates, books, queries and reloads a room" {
            let input = "3\n101\nMain Hall\n50\n2\n101\n9\n2\n101\n9\n\n6\n";
            let (result, out) = drive(&mut session, input);
            result.expect("loop should finish");

            assert!(out.contains("Room 101 is already booked for 09:00-10:00"));

            let store = session.store();
            assert!(store.by_hour(hour(9)).is_empty());
            assert_eq!(store.by_hour(hour(10)).len(), 1);

            let reloaded = Session::open(file.clone()).expect("Failed to load");
            assert_eq!(reloaded.store(), store);
        }
    }
}
