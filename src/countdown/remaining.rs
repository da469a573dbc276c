//! Remaining Time

use std::fmt;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Time left until a timer ends, split into display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Remaining {
    /// Whole days
    pub days: u64,

    /// Hours, `0..24`
    pub hours: u64,

    /// Minutes, `0..60`
    pub minutes: u64,

    /// Seconds, `0..60`
    pub seconds: u64,
}

impl Remaining {
    /// Split a non-negative distance in milliseconds into display units,
    /// discarding the sub-second part. Returns `None` for negative distances.
    pub fn from_millis(distance: i64) -> Option<Self> {
        let total = u64::try_from(distance).ok()? / 1_000;

        Some(Self {
            days: total / SECONDS_PER_DAY,
            hours: (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        })
    }

    /// Recombine the units into whole seconds
    pub const fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
