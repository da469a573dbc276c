use clap::Args;
use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Rows},
};

use countdown_app::domain::timers::{TimersService, records::TimerRecord};

use crate::cli::{parse_shop, timer::timers_service};

#[derive(Debug, Args)]
pub(crate) struct ListTimersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop whose timers should be listed
    #[arg(long)]
    shop: String,
}

pub(crate) async fn run(args: ListTimersArgs) -> Result<(), String> {
    let shop = parse_shop(&args.shop)?;

    let timers = timers_service(&args.database_url)
        .await?
        .list_timers(&shop)
        .await
        .map_err(|error| format!("failed to list timers: {error}"))?;

    if timers.is_empty() {
        println!("no timers found for shop {shop}");
        return Ok(());
    }

    println!("{}", render_timers(&timers));

    Ok(())
}

fn render_timers(timers: &[TimerRecord]) -> String {
    let mut builder = Builder::default();

    builder.push_record([
        "UUID", "Product", "Name", "Starts", "Ends", "Trigger", "Effect", "Active",
    ]);

    for record in timers {
        let timer = &record.timer;

        builder.push_record([
            record.uuid.to_string(),
            timer.product_id.clone(),
            timer.name.clone().unwrap_or_default(),
            timer.window.start().to_string(),
            timer.window.end().to_string(),
            format!("{}m", timer.settings.urgency_trigger_minutes.minutes()),
            timer.settings.urgency_notification_type.to_string(),
            if timer.is_active { "yes" } else { "no" }.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    table.to_string()
}
