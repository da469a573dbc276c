use clap::Args;
use jiff::Timestamp;

use countdown::timers::{
    DisplayPosition, DisplaySize, Timer, TimerSettings, TimerWindow, UrgencyNotification,
    UrgencyTrigger, settings::{DEFAULT_COLOR, DEFAULT_URGENCY_TRIGGER_MINUTES},
};
use countdown_app::domain::timers::{TimersService, data::NewTimer, records::TimerUuid};

use crate::cli::{parse_shop, timer::timers_service};

#[derive(Debug, Args)]
pub(crate) struct CreateTimerArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop domain that owns the timer
    #[arg(long)]
    shop: String,

    /// Product identifier, numeric or `gid://shopify/Product/<n>`
    #[arg(long)]
    product: String,

    /// Admin-facing name
    #[arg(long)]
    name: Option<String>,

    /// Storefront description
    #[arg(long)]
    description: Option<String>,

    /// Start instant (RFC 3339)
    #[arg(long)]
    start: Timestamp,

    /// End instant (RFC 3339)
    #[arg(long)]
    end: Timestamp,

    /// Text colour
    #[arg(long, default_value = DEFAULT_COLOR)]
    color: String,

    /// Text size: Small, Medium or Large
    #[arg(long, default_value_t)]
    size: DisplaySize,

    /// Placement: Top, Bottom, Inline or "Below Add to Cart"
    #[arg(long, default_value_t)]
    position: DisplayPosition,

    /// Minutes before the end at which urgency starts
    #[arg(long, default_value_t = DEFAULT_URGENCY_TRIGGER_MINUTES)]
    urgency_trigger_minutes: f64,

    /// Urgency effect: "Color pulse", "Notification banner", Bar or None
    #[arg(long, default_value_t)]
    urgency_notification: UrgencyNotification,

    /// Store the timer switched off
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateTimerArgs) -> Result<(), String> {
    let shop = parse_shop(&args.shop)?;

    let window =
        TimerWindow::new(args.start, args.end).map_err(|error| format!("invalid window: {error}"))?;

    let urgency_trigger_minutes = UrgencyTrigger::new(args.urgency_trigger_minutes)
        .map_err(|error| format!("invalid urgency trigger: {error}"))?;

    let mut timer = Timer::new(shop.as_str(), args.product, window)
        .map_err(|error| format!("invalid timer: {error}"))?
        .with_settings(TimerSettings {
            color: args.color,
            size: args.size,
            position: args.position,
            urgency_trigger_minutes,
            urgency_notification_type: args.urgency_notification,
        })
        .with_active(!args.inactive);

    timer.name = args.name;
    timer.description = args.description;

    let record = timers_service(&args.database_url)
        .await?
        .create_timer(
            &shop,
            NewTimer {
                uuid: TimerUuid::new(),
                timer,
            },
        )
        .await
        .map_err(|error| format!("failed to create timer: {error}"))?;

    println!("timer_uuid: {}", record.uuid);
    println!("shop_domain: {}", record.timer.shop_domain);
    println!("product_id: {}", record.timer.product_id);
    println!("start_date: {}", record.timer.window.start());
    println!("end_date: {}", record.timer.window.end());

    Ok(())
}
