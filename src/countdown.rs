//! Countdown
//!
//! The storefront countdown loop, free of any rendering or scheduling. A
//! [`CountdownSession`] is ticked once per [`TICK_INTERVAL`] with the current
//! time and answers with a [`Tick`] describing what to draw.

use std::time::Duration;

pub mod remaining;
pub mod session;

pub use remaining::Remaining;
pub use session::{CountdownSession, Frame, Phase, Tick, UrgencyEffect};

/// Text shown once the end date has passed
pub const EXPIRED_TEXT: &str = "EXPIRED";

/// Time between ticks
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
