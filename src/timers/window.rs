//! Timer Window

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::timers::TimerError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWindow {
    start_date: Timestamp,
    end_date: Timestamp,
}

/// Inclusive promotion window; the start never falls after the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWindow")]
pub struct TimerWindow {
    start_date: Timestamp,
    end_date: Timestamp,
}

impl TimerWindow {
    /// Create a window.
    ///
    /// # Errors
    ///
    /// Returns [`TimerError::InvertedWindow`] when `start` is after `end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, TimerError> {
        if start > end {
            return Err(TimerError::InvertedWindow);
        }

        Ok(Self {
            start_date: start,
            end_date: end,
        })
    }

    /// First instant of the window
    #[must_use]
    pub const fn start(&self) -> Timestamp {
        self.start_date
    }

    /// Last instant of the window
    #[must_use]
    pub const fn end(&self) -> Timestamp {
        self.end_date
    }

    /// Whether `now` lies inside the window, bounds included.
    #[must_use]
    pub fn contains(&self, now: Timestamp) -> bool {
        self.start_date <= now && now <= self.end_date
    }

    /// Signed milliseconds from `now` until the end; negative once past it.
    #[must_use]
    pub fn remaining_millis(&self, now: Timestamp) -> i64 {
        self.end_date.as_millisecond() - now.as_millisecond()
    }
}

impl TryFrom<RawWindow> for TimerWindow {
    type Error = TimerError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start_date, raw.end_date)
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn bounds_are_inclusive() -> TestResult {
        let start = Timestamp::from_second(1_000)?;
        let end = Timestamp::from_second(2_000)?;
        let window = TimerWindow::new(start, end)?;

        assert!(window.contains(start));
        assert!(window.contains(end));
        assert!(!window.contains(start.checked_sub(SignedDuration::from_millis(1))?));
        assert!(!window.contains(end.checked_add(SignedDuration::from_millis(1))?));

        Ok(())
    }

    #[test]
    fn zero_length_window_is_allowed() -> TestResult {
        let instant = Timestamp::from_second(1_000)?;
        let window = TimerWindow::new(instant, instant)?;

        assert!(window.contains(instant));

        Ok(())
    }

    #[test]
    fn inverted_window_is_rejected() -> TestResult {
        let start = Timestamp::from_second(2_000)?;
        let end = Timestamp::from_second(1_000)?;

        assert_eq!(TimerWindow::new(start, end), Err(TimerError::InvertedWindow));

        Ok(())
    }

    #[test]
    fn remaining_millis_goes_negative_after_end() -> TestResult {
        let window = TimerWindow::new(Timestamp::from_second(0)?, Timestamp::from_second(10)?)?;

        assert_eq!(window.remaining_millis(Timestamp::from_second(4)?), 6_000);
        assert_eq!(window.remaining_millis(Timestamp::from_second(11)?), -1_000);

        Ok(())
    }
}
