//! Countdown Domain Concerns

pub mod shops;
pub mod timers;
