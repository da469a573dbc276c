//! Timer Data

use countdown::timers::Timer;

use crate::domain::timers::records::TimerUuid;

/// New Timer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimer {
    /// UUID to assign to the timer row.
    pub uuid: TimerUuid,

    /// Timer document to persist.
    pub timer: Timer,
}

/// Timer Update Data; replaces the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerUpdate {
    /// Replacement timer document.
    pub timer: Timer,
}
