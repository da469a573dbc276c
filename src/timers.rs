//! Timers

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod settings;
pub mod window;

pub use settings::{
    DisplayPosition, DisplaySize, TimerSettings, UrgencyNotification, UrgencyTrigger,
};
pub use window::TimerWindow;

/// Timer validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The window starts after it ends
    #[error("timer start date must not be after its end date")]
    InvertedWindow,

    /// Blank shop domain
    #[error("shop domain is required")]
    MissingShopDomain,

    /// Blank product identifier
    #[error("product identifier is required")]
    MissingProduct,

    /// Urgency trigger of zero minutes
    #[error("urgency trigger must be a positive number of minutes")]
    InvalidUrgencyTrigger,

    /// A setting value outside its closed set
    #[error("unknown {setting} value: {value:?}")]
    UnknownSetting {
        /// Setting name
        setting: &'static str,

        /// Rejected value
        value: String,
    },
}

/// Countdown timer promotion for one product in one shop.
///
/// Serialises with the camelCase document layout the storefront widget reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    /// Shop the timer belongs to
    pub shop_domain: String,

    /// Promoted product, in numeric or compound form
    pub product_id: String,

    /// Admin-facing name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Text shown under the countdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Start and end of the promotion
    #[serde(flatten)]
    pub window: TimerWindow,

    /// Display configuration
    #[serde(default)]
    pub settings: TimerSettings,

    /// Whether the timer may be shown at all
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

impl Timer {
    /// Create an active timer with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the shop domain or product identifier is blank.
    pub fn new(
        shop_domain: impl Into<String>,
        product_id: impl Into<String>,
        window: TimerWindow,
    ) -> Result<Self, TimerError> {
        let shop_domain = shop_domain.into();
        let product_id = product_id.into();

        if shop_domain.trim().is_empty() {
            return Err(TimerError::MissingShopDomain);
        }

        if product_id.trim().is_empty() {
            return Err(TimerError::MissingProduct);
        }

        Ok(Self {
            shop_domain,
            product_id,
            name: None,
            description: None,
            window,
            settings: TimerSettings::default(),
            is_active: true,
        })
    }

    /// Set the admin-facing name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the storefront description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the display settings
    #[must_use]
    pub fn with_settings(mut self, settings: TimerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the active flag
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Whether the storefront may display this timer at `now`.
    pub fn is_eligible(&self, now: Timestamp) -> bool {
        self.is_active && self.window.contains(now)
    }
}
