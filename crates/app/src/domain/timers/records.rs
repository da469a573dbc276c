//! Timer Records

use jiff::Timestamp;

use countdown::timers::Timer;

use crate::uuids::TypedUuid;

/// Timer UUID
pub type TimerUuid = TypedUuid<TimerRecord>;

/// Timer Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRecord {
    /// Unique timer identifier.
    pub uuid: TimerUuid,

    /// Stored timer document.
    pub timer: Timer,

    /// Creation timestamp; newer timers win lookups.
    pub created_at: Timestamp,

    /// Last rewrite timestamp.
    pub updated_at: Timestamp,
}
