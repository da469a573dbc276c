//! Timer Display Settings

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::timers::TimerError;

/// Default countdown text colour
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Default urgency trigger, in minutes
pub const DEFAULT_URGENCY_TRIGGER_MINUTES: f64 = 5.0;

/// Display configuration for a timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerSettings {
    /// CSS colour of the countdown text
    pub color: String,

    /// Countdown text size
    pub size: DisplaySize,

    /// Where the theme block places the widget
    pub position: DisplayPosition,

    /// Remaining minutes at or below which urgency effects start
    pub urgency_trigger_minutes: UrgencyTrigger,

    /// Effect applied once urgency starts
    pub urgency_notification_type: UrgencyNotification,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            size: DisplaySize::default(),
            position: DisplayPosition::default(),
            urgency_trigger_minutes: UrgencyTrigger::default(),
            urgency_notification_type: UrgencyNotification::default(),
        }
    }
}

/// Countdown text size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplaySize {
    /// Small text
    Small,

    /// Medium text
    #[default]
    Medium,

    /// Large text
    Large,
}

impl DisplaySize {
    /// Every size, in display order
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Stored/serialised name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    /// CSS font size for the countdown text
    #[must_use]
    pub const fn font_size(self) -> &'static str {
        match self {
            Self::Small => "1.2em",
            Self::Medium => "1.5em",
            Self::Large => "2em",
        }
    }
}

/// Widget placement on the product page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayPosition {
    /// Above the product details
    #[default]
    Top,

    /// Below the product details
    Bottom,

    /// Inline with the theme block
    Inline,

    /// Directly below the add-to-cart button
    #[serde(rename = "Below Add to Cart")]
    BelowAddToCart,
}

impl DisplayPosition {
    /// Every position, in display order
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Inline, Self::BelowAddToCart];

    /// Stored/serialised name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Inline => "Inline",
            Self::BelowAddToCart => "Below Add to Cart",
        }
    }
}

/// Urgency effect configured by the merchant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyNotification {
    /// Pulse the countdown container
    #[default]
    #[serde(rename = "Color pulse")]
    ColorPulse,

    /// Reveal the "offer ends soon" banner
    #[serde(rename = "Notification banner")]
    NotificationBanner,

    /// Bar; no visual effect beyond the popup
    Bar,

    /// No visual effect beyond the popup
    None,
}

impl UrgencyNotification {
    /// Every notification type, in display order
    pub const ALL: [Self; 4] = [
        Self::ColorPulse,
        Self::NotificationBanner,
        Self::Bar,
        Self::None,
    ];

    /// Stored/serialised name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ColorPulse => "Color pulse",
            Self::NotificationBanner => "Notification banner",
            Self::Bar => "Bar",
            Self::None => "None",
        }
    }
}

/// Positive, finite number of minutes before the end at which urgency
/// starts. Fractions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UrgencyTrigger(f64);

const MILLIS_PER_MINUTE: f64 = 60_000.0;

impl UrgencyTrigger {
    /// Create a trigger.
    ///
    /// # Errors
    ///
    /// Returns an error for zero, negative or non-finite minutes.
    pub fn new(minutes: f64) -> Result<Self, TimerError> {
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(TimerError::InvalidUrgencyTrigger);
        }

        Ok(Self(minutes))
    }

    /// Trigger in minutes
    #[must_use]
    pub const fn minutes(self) -> f64 {
        self.0
    }

    /// Whether `distance` milliseconds before the end is at or under the trigger.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "countdown distances are far below 2^53 milliseconds"
    )]
    pub fn is_reached(self, distance: i64) -> bool {
        distance as f64 / MILLIS_PER_MINUTE <= self.0
    }
}

// Only finite, positive values are constructed, so equality is reflexive.
impl Eq for UrgencyTrigger {}

impl Hash for UrgencyTrigger {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for UrgencyTrigger {
    fn default() -> Self {
        Self(DEFAULT_URGENCY_TRIGGER_MINUTES)
    }
}

impl TryFrom<f64> for UrgencyTrigger {
    type Error = TimerError;

    fn try_from(minutes: f64) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<UrgencyTrigger> for f64 {
    fn from(trigger: UrgencyTrigger) -> Self {
        trigger.minutes()
    }
}

fn parse_setting<T: Copy>(
    setting: &'static str,
    value: &str,
    all: &[T],
    as_str: fn(T) -> &'static str,
) -> Result<T, TimerError> {
    all.iter()
        .copied()
        .find(|candidate| as_str(*candidate) == value)
        .ok_or_else(|| TimerError::UnknownSetting {
            setting,
            value: value.to_string(),
        })
}

impl FromStr for DisplaySize {
    type Err = TimerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_setting("size", value, &Self::ALL, Self::as_str)
    }
}

impl FromStr for DisplayPosition {
    type Err = TimerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_setting("position", value, &Self::ALL, Self::as_str)
    }
}

impl FromStr for UrgencyNotification {
    type Err = TimerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parse_setting("urgencyNotificationType", value, &Self::ALL, Self::as_str)
    }
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DisplayPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UrgencyNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_match_admin_form() -> TestResult {
        let settings = TimerSettings::default();

        assert_eq!(settings.color, "#ff0000");
        assert_eq!(settings.size, DisplaySize::Medium);
        assert_eq!(settings.position, DisplayPosition::Top);
        assert_eq!(settings.urgency_trigger_minutes, UrgencyTrigger::default());
        assert_eq!(
            serde_json::to_value(settings.urgency_trigger_minutes)?,
            serde_json::json!(5.0)
        );
        assert_eq!(
            settings.urgency_notification_type,
            UrgencyNotification::ColorPulse
        );

        Ok(())
    }

    #[test]
    fn urgency_trigger_accepts_fractional_minutes() -> TestResult {
        let trigger: UrgencyTrigger = serde_json::from_value(serde_json::json!(7.5))?;

        assert_eq!(trigger, UrgencyTrigger::new(7.5)?);
        assert!(trigger.is_reached(450_000), "7.5 minutes is inclusive");
        assert!(!trigger.is_reached(450_001));

        let whole: UrgencyTrigger = serde_json::from_value(serde_json::json!(30))?;

        assert_eq!(whole, UrgencyTrigger::new(30.0)?);

        Ok(())
    }

    #[test]
    fn urgency_trigger_rejects_non_positive_and_non_finite() {
        for minutes in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                UrgencyTrigger::new(minutes),
                Err(TimerError::InvalidUrgencyTrigger),
                "{minutes} must be rejected"
            );
        }

        assert!(serde_json::from_value::<UrgencyTrigger>(serde_json::json!(0)).is_err());
    }

    #[test]
    fn from_str_accepts_stored_names() -> TestResult {
        assert_eq!(
            "Below Add to Cart".parse::<DisplayPosition>()?,
            DisplayPosition::BelowAddToCart
        );
        assert_eq!("Small".parse::<DisplaySize>()?, DisplaySize::Small);
        assert_eq!(
            "None".parse::<UrgencyNotification>()?,
            UrgencyNotification::None
        );

        Ok(())
    }

    #[test]
    fn from_str_rejects_unknown_values() {
        assert_eq!(
            "color pulse".parse::<UrgencyNotification>(),
            Err(TimerError::UnknownSetting {
                setting: "urgencyNotificationType",
                value: "color pulse".to_string(),
            })
        );
        assert!("Huge".parse::<DisplaySize>().is_err());
    }

    #[test]
    fn as_str_and_serde_names_agree() -> TestResult {
        for notification in UrgencyNotification::ALL {
            assert_eq!(
                serde_json::to_value(notification)?,
                serde_json::Value::from(notification.as_str())
            );
        }

        for position in DisplayPosition::ALL {
            assert_eq!(
                serde_json::to_value(position)?,
                serde_json::Value::from(position.as_str())
            );
        }

        Ok(())
    }
}
