//! Countdown prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    countdown::{
        CountdownSession, EXPIRED_TEXT, Frame, Phase, Remaining, TICK_INTERVAL, Tick,
        UrgencyEffect,
    },
    products::{PRODUCT_GID_PREFIX, ProductReference, ProductReferenceError},
    resolution::{ResolutionError, TimerQuery, select_active},
    shops::{ShopDomain, ShopDomainError},
    timers::{
        DisplayPosition, DisplaySize, Timer, TimerError, TimerSettings, TimerWindow,
        UrgencyNotification, UrgencyTrigger,
    },
};
