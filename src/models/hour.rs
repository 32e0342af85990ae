use std::fmt;

/// Number of bookable slots in a day.
pub const HOURS_PER_DAY: usize = 24;

/// A slot index in `0..HOURS_PER_DAY`.
///
/// Construction goes through [`Hour::new`] so an `Hour` can always index a
/// room's slot array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hour(u8);

impl Hour {
    pub fn new(hour: u32) -> Option<Self> {
        if (hour as usize) < HOURS_PER_DAY {
            Some(Self(hour as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All slots of a day in order.
    pub fn all() -> impl Iterator<Item = Hour> {
        (0..HOURS_PER_DAY as u8).map(Hour)
    }

    /// Human label for the slot, e.g. `09:00-10:00`.
    pub fn label(self) -> String {
        format!("{:02}:00-{:02}:00", self.0, self.0 + 1)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
