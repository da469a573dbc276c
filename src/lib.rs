//! Countdown
//!
//! Countdown is the domain core of a storefront countdown-timer add-on: the
//! timer model and its display settings, product identifier normalisation,
//! active-timer resolution rules and the client-side countdown state machine.

pub mod countdown;
pub mod fixtures;
pub mod prelude;
pub mod products;
pub mod resolution;
pub mod shops;
pub mod timers;
