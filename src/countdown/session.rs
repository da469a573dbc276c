//! Countdown Session

use jiff::Timestamp;

use crate::{
    countdown::remaining::Remaining,
    timers::{Timer, UrgencyNotification, UrgencyTrigger},
};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Ticking
    Running,

    /// The end date has passed; terminal
    Expired,

    /// The owning widget went away; terminal
    TornDown,
}

/// Visual emphasis applied while urgency is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrgencyEffect {
    /// Pulse the countdown container
    Pulse,

    /// Show the "offer ends soon" banner
    Banner,
}

impl UrgencyEffect {
    /// Effect for a configured notification type, if it has one beyond the popup.
    pub const fn for_notification(notification: UrgencyNotification) -> Option<Self> {
        match notification {
            UrgencyNotification::ColorPulse => Some(Self::Pulse),
            UrgencyNotification::NotificationBanner => Some(Self::Banner),
            UrgencyNotification::Bar | UrgencyNotification::None => None,
        }
    }
}

/// What to render for one running tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Time left, shown on every countdown surface
    pub remaining: Remaining,

    /// Urgency threshold has been crossed
    pub urgent: bool,

    /// This tick revealed the popup; true on at most one tick per session
    pub reveal_popup: bool,

    /// Popup is currently on screen
    pub popup_visible: bool,

    /// Effect to apply on this tick
    pub effect: Option<UrgencyEffect>,
}

/// Outcome of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Render this frame and keep ticking
    Running(Frame),

    /// Show the expired text and stop ticking
    Expired,

    /// The session already ended; do nothing
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Popup {
    Hidden,
    Visible,
    Dismissed,
}

/// Countdown state for one widget instance.
///
/// Every tick derives its output from the wall-clock instant passed in, so a
/// late or repeated tick only re-renders the current state.
#[derive(Debug, Clone)]
pub struct CountdownSession {
    end: Timestamp,
    trigger: UrgencyTrigger,
    effect: Option<UrgencyEffect>,
    phase: Phase,
    urgency_active: bool,
    popup: Popup,
}

impl CountdownSession {
    /// Start a session for a resolved timer
    pub fn new(timer: &Timer) -> Self {
        Self {
            end: timer.window.end(),
            trigger: timer.settings.urgency_trigger_minutes,
            effect: UrgencyEffect::for_notification(timer.settings.urgency_notification_type),
            phase: Phase::Running,
            urgency_active: false,
            popup: Popup::Hidden,
        }
    }

    /// Advance the session to `now`.
    pub fn tick(&mut self, now: Timestamp) -> Tick {
        if self.phase != Phase::Running {
            return Tick::Halted;
        }

        let distance = self.end.as_millisecond() - now.as_millisecond();

        let Some(remaining) = Remaining::from_millis(distance) else {
            self.phase = Phase::Expired;

            return Tick::Expired;
        };

        if self.trigger.is_reached(distance) {
            self.urgency_active = true;
        }

        let reveal_popup = self.urgency_active && self.popup == Popup::Hidden;

        if reveal_popup {
            self.popup = Popup::Visible;
        }

        Tick::Running(Frame {
            remaining,
            urgent: self.urgency_active,
            reveal_popup,
            popup_visible: self.popup == Popup::Visible,
            effect: self.effect.filter(|_| self.urgency_active),
        })
    }

    /// Hide the popup. It is never shown again for this session.
    pub fn dismiss_popup(&mut self) {
        if self.popup == Popup::Visible {
            self.popup = Popup::Dismissed;
        }
    }

    /// Stop the session; later ticks are halted.
    pub fn tear_down(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::TornDown;
        }
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the popup has ever been revealed
    pub fn popup_shown(&self) -> bool {
        self.popup != Popup::Hidden
    }

    /// Whether the urgency threshold has been crossed
    pub const fn urgency_active(&self) -> bool {
        self.urgency_active
    }

    /// End of the countdown
    pub const fn end(&self) -> Timestamp {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::timers::{TimerSettings, TimerWindow};

    use super::*;

    fn session_ending_in(
        now: Timestamp,
        distance: SignedDuration,
        notification: UrgencyNotification,
    ) -> TestResult<CountdownSession> {
        let window = TimerWindow::new(now, now.checked_add(distance)?)?;
        let settings = TimerSettings {
            urgency_trigger_minutes: UrgencyTrigger::new(30.0)?,
            urgency_notification_type: notification,
            ..TimerSettings::default()
        };
        let timer = Timer::new("demo.myshopify.com", "555", window)?.with_settings(settings);

        Ok(CountdownSession::new(&timer))
    }

    #[test]
    fn bar_and_none_have_no_effect() {
        assert_eq!(UrgencyEffect::for_notification(UrgencyNotification::Bar), None);
        assert_eq!(UrgencyEffect::for_notification(UrgencyNotification::None), None);
    }

    #[test]
    fn banner_effect_applies_once_urgent() -> TestResult {
        let now = Timestamp::from_second(1_000_000)?;
        let mut session = session_ending_in(
            now,
            SignedDuration::from_mins(10),
            UrgencyNotification::NotificationBanner,
        )?;

        let Tick::Running(frame) = session.tick(now) else {
            return Err("expected a running tick".into());
        };

        assert_eq!(frame.effect, Some(UrgencyEffect::Banner));

        Ok(())
    }

    #[test]
    fn threshold_is_inclusive() -> TestResult {
        let now = Timestamp::from_second(1_000_000)?;
        let mut session = session_ending_in(
            now,
            SignedDuration::from_mins(30),
            UrgencyNotification::ColorPulse,
        )?;

        let Tick::Running(frame) = session.tick(now) else {
            return Err("expected a running tick".into());
        };

        assert!(frame.urgent);
        assert!(frame.reveal_popup);

        Ok(())
    }

    #[test]
    fn fractional_trigger_is_inclusive_at_its_boundary() -> TestResult {
        let now = Timestamp::from_second(1_000_000)?;
        let window = TimerWindow::new(now, now.checked_add(SignedDuration::from_secs(450))?)?;
        let timer = Timer::new("demo.myshopify.com", "555", window)?.with_settings(TimerSettings {
            urgency_trigger_minutes: UrgencyTrigger::new(7.5)?,
            ..TimerSettings::default()
        });
        let mut session = CountdownSession::new(&timer);

        let Tick::Running(early) =
            session.tick(now.checked_sub(SignedDuration::from_millis(1))?)
        else {
            return Err("expected a running tick".into());
        };

        assert!(!early.urgent, "7m 30.001s left is above the trigger");

        let Tick::Running(boundary) = session.tick(now) else {
            return Err("expected a running tick".into());
        };

        assert!(boundary.urgent, "exactly 7m 30s left reaches the trigger");
        assert!(boundary.reveal_popup);

        Ok(())
    }

    #[test]
    fn dismissed_popup_stays_hidden_while_effects_continue() -> TestResult {
        let now = Timestamp::from_second(1_000_000)?;
        let mut session = session_ending_in(
            now,
            SignedDuration::from_mins(5),
            UrgencyNotification::ColorPulse,
        )?;

        session.tick(now);
        session.dismiss_popup();

        let Tick::Running(frame) = session.tick(now.checked_add(SignedDuration::from_secs(1))?)
        else {
            return Err("expected a running tick".into());
        };

        assert!(!frame.popup_visible);
        assert!(!frame.reveal_popup);
        assert_eq!(frame.effect, Some(UrgencyEffect::Pulse));
        assert!(session.popup_shown());

        Ok(())
    }

    #[test]
    fn torn_down_session_halts() -> TestResult {
        let now = Timestamp::from_second(1_000_000)?;
        let mut session = session_ending_in(
            now,
            SignedDuration::from_hours(1),
            UrgencyNotification::ColorPulse,
        )?;

        session.tear_down();

        assert_eq!(session.phase(), Phase::TornDown);
        assert_eq!(session.tick(now), Tick::Halted);

        Ok(())
    }

    #[test]
    fn tear_down_after_expiry_keeps_expired_phase() -> TestResult {
        let now = Timestamp::from_second(1_000_000)?;
        let mut session = session_ending_in(
            now,
            SignedDuration::ZERO,
            UrgencyNotification::ColorPulse,
        )?;

        assert_eq!(
            session.tick(now.checked_add(SignedDuration::from_millis(1))?),
            Tick::Expired
        );

        session.tear_down();

        assert_eq!(session.phase(), Phase::Expired);

        Ok(())
    }
}
