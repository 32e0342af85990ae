//! Row encoding for the bookings file.
//!
//! ```text
//! room_no,building,capacity,booked_hours
//! 101,Main Hall,50,0;0;1;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0;0
//! ```
//!
//! Text fields containing the field delimiter, a quote or a line break are
//! double-quoted with inner quotes doubled.

use crate::models::{Room, HOURS_PER_DAY};
use crate::store::RoomStore;

use super::PersistError;

pub const HEADER: [&str; 4] = ["room_no", "building", "capacity", "booked_hours"];
pub const FIELD_DELIMITER: char = ',';
pub const LIST_DELIMITER: char = ';';

const QUOTE: char = '"';

pub fn encode(store: &RoomStore) -> String {
    let mut out = HEADER.join(FIELD_DELIMITER.to_string().as_str());
    out.push('\n');
    for room in store.iter() {
        encode_room(&mut out, room);
    }
    out
}

fn encode_room(out: &mut String, room: &Room) {
    push_field(out, &room.room_no);
    out.push(FIELD_DELIMITER);
    push_field(out, &room.building);
    out.push(FIELD_DELIMITER);
    out.push_str(&room.capacity.to_string());
    out.push(FIELD_DELIMITER);
    for (i, booked) in room.booked_hours.iter().enumerate() {
        if i != 0 {
            out.push(LIST_DELIMITER);
        }
        out.push(if *booked { '1' } else { '0' });
    }
    out.push('\n');
}

fn push_field(out: &mut String, value: &str) {
    let needs_quotes = value
        .chars()
        .any(|c| c == FIELD_DELIMITER || c == QUOTE || c == '\n' || c == '\r');
    if !needs_quotes {
        out.push_str(value);
        return;
    }
    out.push(QUOTE);
    for c in value.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}

pub fn decode(text: &str) -> Result<RoomStore, PersistError> {
    let mut rows = split_rows(text)?.into_iter();

    match rows.next() {
        None => return Err(PersistError::malformed(1, "missing header row")),
        Some(header) if header.fields != HEADER => {
            return Err(PersistError::malformed(
                header.line,
                format!("unexpected header {:?}", header.fields.join(",")),
            ))
        }
        Some(_) => {}
    }

    let mut store = RoomStore::new();
    for row in rows {
        let line = row.line;
        let room = decode_room(row)?;
        store
            .insert(room)
            .map_err(|e| PersistError::malformed(line, e.to_string()))?;
    }
    Ok(store)
}

fn decode_room(row: Row) -> Result<Room, PersistError> {
    let line = row.line;
    let Ok([room_no, building, capacity, hours]) = <[String; 4]>::try_from(row.fields) else {
        return Err(PersistError::malformed(
            line,
            format!("expected {} fields", HEADER.len()),
        ));
    };

    let capacity = parse_capacity(&capacity).ok_or_else(|| {
        PersistError::malformed(line, format!("capacity {:?} is not an integer", capacity))
    })?;

    let tokens: Vec<&str> = hours.split(LIST_DELIMITER).collect();
    if tokens.len() != HOURS_PER_DAY {
        return Err(PersistError::malformed(
            line,
            format!(
                "booked_hours has {} slots, expected {}",
                tokens.len(),
                HOURS_PER_DAY
            ),
        ));
    }

    let mut booked_hours = [false; HOURS_PER_DAY];
    for (slot, token) in booked_hours.iter_mut().zip(tokens) {
        *slot = match token {
            "0" => false,
            "1" => true,
            other => {
                return Err(PersistError::malformed(
                    line,
                    format!("invalid slot token {:?}", other),
                ))
            }
        };
    }

    Ok(Room {
        room_no,
        building,
        capacity,
        booked_hours,
    })
}

fn parse_capacity(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// A raw row and the line it starts on.
#[derive(Debug)]
struct Row {
    line: usize,
    fields: Vec<String>,
}

fn split_rows(text: &str) -> Result<Vec<Row>, PersistError> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut line = 1;
    let mut row_line = 1;
    let mut in_quotes = false;
    let mut closed_quote = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => {
                    in_quotes = false;
                    closed_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        if closed_quote {
            // A quoted field must end right at its closing quote.
            let ends_field = c == FIELD_DELIMITER
                || c == '\n'
                || (c == '\r' && chars.peek() == Some(&'\n'));
            if !ends_field {
                return Err(PersistError::malformed(
                    row_line,
                    "unexpected text after closing quote",
                ));
            }
            closed_quote = c == '\r';
        }

        match c {
            QUOTE if field.is_empty() => in_quotes = true,
            FIELD_DELIMITER => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                finish_row(&mut rows, row_line, std::mem::take(&mut fields));
                line += 1;
                row_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(PersistError::malformed(row_line, "unterminated quoted field"));
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        finish_row(&mut rows, row_line, fields);
    }
    Ok(rows)
}

fn finish_row(rows: &mut Vec<Row>, line: usize, fields: Vec<String>) {
    // Blank lines carry no record.
    if fields.len() == 1 && fields[0].is_empty() {
        return;
    }
    rows.push(Row { line, fields });
}
