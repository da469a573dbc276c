//! Timer Models

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use countdown::{
    shops::ShopDomain,
    timers::{Timer, TimerError, TimerSettings, TimerWindow, UrgencyTrigger},
};
use countdown_app::domain::timers::records::TimerRecord;

use crate::errors::ApiError;

/// Timer display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimerSettingsResponse {
    /// CSS colour of the countdown text
    pub color: String,

    /// `Small`, `Medium` or `Large`
    pub size: String,

    /// `Top`, `Bottom`, `Inline` or `Below Add to Cart`
    pub position: String,

    /// Remaining minutes at which urgency effects start; may be fractional
    pub urgency_trigger_minutes: f64,

    /// `Color pulse`, `Notification banner`, `Bar` or `None`
    pub urgency_notification_type: String,
}

impl From<&TimerSettings> for TimerSettingsResponse {
    fn from(settings: &TimerSettings) -> Self {
        Self {
            color: settings.color.clone(),
            size: settings.size.to_string(),
            position: settings.position.to_string(),
            urgency_trigger_minutes: settings.urgency_trigger_minutes.minutes(),
            urgency_notification_type: settings.urgency_notification_type.to_string(),
        }
    }
}

/// Stored timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimerResponse {
    /// Timer identifier
    pub id: Uuid,

    /// Owning shop
    pub shop_domain: String,

    /// Product identifier as stored
    pub product_id: String,

    /// Admin-facing name
    pub name: Option<String>,

    /// Storefront description
    pub description: Option<String>,

    /// Promotion start
    pub start_date: String,

    /// Promotion end
    pub end_date: String,

    /// Display settings
    pub settings: TimerSettingsResponse,

    /// Whether the timer may be displayed
    pub is_active: bool,

    /// Creation time
    pub created_at: String,

    /// Last rewrite time
    pub updated_at: String,
}

impl From<TimerRecord> for TimerResponse {
    fn from(record: TimerRecord) -> Self {
        let settings = TimerSettingsResponse::from(&record.timer.settings);
        let timer = record.timer;

        Self {
            id: record.uuid.into_uuid(),
            shop_domain: timer.shop_domain,
            product_id: timer.product_id,
            name: timer.name,
            description: timer.description,
            start_date: timer.window.start().to_string(),
            end_date: timer.window.end().to_string(),
            settings,
            is_active: timer.is_active,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Timers of a shop
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimersResponse {
    /// Newest first
    pub timers: Vec<TimerResponse>,
}

/// Display settings; omitted fields take their defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct TimerSettingsRequest {
    pub color: Option<String>,
    pub size: Option<String>,
    pub position: Option<String>,
    pub urgency_trigger_minutes: Option<f64>,
    pub urgency_notification_type: Option<String>,
}

impl TryFrom<TimerSettingsRequest> for TimerSettings {
    type Error = TimerError;

    fn try_from(request: TimerSettingsRequest) -> Result<Self, Self::Error> {
        let defaults = TimerSettings::default();

        Ok(Self {
            color: request.color.unwrap_or(defaults.color),
            size: request
                .size
                .as_deref()
                .map_or(Ok(defaults.size), str::parse)?,
            position: request
                .position
                .as_deref()
                .map_or(Ok(defaults.position), str::parse)?,
            urgency_trigger_minutes: request
                .urgency_trigger_minutes
                .map_or(Ok(defaults.urgency_trigger_minutes), UrgencyTrigger::new)?,
            urgency_notification_type: request
                .urgency_notification_type
                .as_deref()
                .map_or(Ok(defaults.urgency_notification_type), str::parse)?,
        })
    }
}

/// Timer document for create and full rewrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimerRequest {
    /// Numeric or `gid://shopify/Product/<n>` identifier
    pub product_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// RFC 3339 timestamp
    pub start_date: String,

    /// RFC 3339 timestamp, not before `startDate`
    pub end_date: String,

    #[serde(default)]
    pub settings: TimerSettingsRequest,

    #[serde(default)]
    pub is_active: Option<bool>,
}

fn parse_timestamp(field: &str, value: &str) -> Result<Timestamp, ApiError> {
    value
        .parse()
        .map_err(|error| ApiError::bad_request(format!("invalid {field}: {error}")))
}

fn invalid_timer(error: TimerError) -> ApiError {
    ApiError::bad_request(error.to_string())
}

impl TimerRequest {
    /// Validate the document and scope it to `shop`.
    pub(crate) fn into_timer(self, shop: &ShopDomain) -> Result<Timer, ApiError> {
        let window = TimerWindow::new(
            parse_timestamp("startDate", &self.start_date)?,
            parse_timestamp("endDate", &self.end_date)?,
        )
        .map_err(invalid_timer)?;

        let settings = TimerSettings::try_from(self.settings).map_err(invalid_timer)?;

        let mut timer = Timer::new(shop.as_str(), self.product_id, window)
            .map_err(invalid_timer)?
            .with_settings(settings)
            .with_active(self.is_active.unwrap_or(true));

        timer.name = self.name;
        timer.description = self.description;

        Ok(timer)
    }
}
