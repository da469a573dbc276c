//! Timer Fixtures

use jiff::{SignedDuration, Timestamp};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    timers::{
        DisplayPosition, DisplaySize, Timer, TimerSettings, TimerWindow, UrgencyNotification,
        UrgencyTrigger, settings::DEFAULT_COLOR,
    },
};

/// Wrapper for timers in YAML
#[derive(Debug, Deserialize)]
pub struct TimersFixture {
    /// Timers in creation order
    pub timers: Vec<TimerEntry>,
}

/// Timer fixture from YAML
#[derive(Debug, Deserialize)]
pub struct TimerEntry {
    /// Fixture key, used in error messages and as the default name
    pub key: String,

    /// Shop domain
    pub shop_domain: String,

    /// Product identifier in either form
    pub product_id: String,

    /// Admin-facing name
    #[serde(default)]
    pub name: Option<String>,

    /// Storefront description
    #[serde(default)]
    pub description: Option<String>,

    /// Start offset from the reference instant, e.g. `-1h`
    pub starts_in: String,

    /// End offset from the reference instant, e.g. `2h 30m`
    pub ends_in: String,

    /// Text colour
    #[serde(default)]
    pub color: Option<String>,

    /// Text size
    #[serde(default)]
    pub size: DisplaySize,

    /// Widget placement
    #[serde(default)]
    pub position: DisplayPosition,

    /// Urgency trigger in minutes
    #[serde(default)]
    pub urgency_trigger_minutes: UrgencyTrigger,

    /// Urgency effect
    #[serde(default)]
    pub urgency_notification: UrgencyNotification,

    /// Active flag
    #[serde(default = "active_by_default")]
    pub active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl TimersFixture {
    /// Build every timer relative to `reference`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns an error if an offset is malformed or a timer is invalid.
    pub fn into_timers(self, reference: Timestamp) -> Result<Vec<Timer>, FixtureError> {
        self.timers
            .into_iter()
            .map(|entry| entry.into_timer(reference))
            .collect()
    }
}

impl TimerEntry {
    /// Build the timer relative to `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if an offset is malformed or the timer is invalid.
    pub fn into_timer(self, reference: Timestamp) -> Result<Timer, FixtureError> {
        let start = offset(&self.key, &self.starts_in, reference)?;
        let end = offset(&self.key, &self.ends_in, reference)?;

        let invalid = |source| FixtureError::Timer {
            timer: self.key.clone(),
            source,
        };

        let window = TimerWindow::new(start, end).map_err(invalid)?;

        let settings = TimerSettings {
            color: self.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            size: self.size,
            position: self.position,
            urgency_trigger_minutes: self.urgency_trigger_minutes,
            urgency_notification_type: self.urgency_notification,
        };

        let timer = Timer::new(self.shop_domain, self.product_id, window)
            .map_err(invalid)?
            .with_name(self.name.unwrap_or_else(|| self.key.clone()))
            .with_settings(settings)
            .with_active(self.active);

        Ok(match self.description {
            Some(description) => timer.with_description(description),
            None => timer,
        })
    }
}

fn offset(key: &str, value: &str, reference: Timestamp) -> Result<Timestamp, FixtureError> {
    value
        .parse::<SignedDuration>()
        .ok()
        .and_then(|duration| reference.checked_add(duration).ok())
        .ok_or_else(|| FixtureError::Offset {
            timer: key.to_string(),
            value: value.to_string(),
        })
}
