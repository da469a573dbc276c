use std::path::PathBuf;

use clap::Args;
use jiff::Timestamp;

use countdown::fixtures::TimersFixture;
use countdown_app::domain::{
    shops::{PgShopsService, ShopsService, ShopsServiceError, data::NewShop},
    timers::{PgTimersService, TimersService, data::NewTimer, records::TimerUuid},
};
use countdown_app::database::Db;

use crate::cli::{connect, parse_shop};

#[derive(Debug, Args)]
pub(crate) struct SeedTimersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// YAML fixture whose offsets are applied to the current time
    #[arg(long, default_value = "fixtures/timers/demo.yml")]
    file: PathBuf,
}

pub(crate) async fn run(args: SeedTimersArgs) -> Result<(), String> {
    let timers = TimersFixture::from_path(&args.file)
        .and_then(|fixture| fixture.into_timers(Timestamp::now()))
        .map_err(|error| format!("failed to load {}: {error}", args.file.display()))?;

    let pool = connect(&args.database_url).await?;
    let shops = PgShopsService::new(pool.clone());
    let service = PgTimersService::new(Db::new(pool));

    for timer in timers {
        let shop = parse_shop(&timer.shop_domain)?;

        match shops.create_shop(NewShop { domain: shop.clone() }).await {
            Ok(_) | Err(ShopsServiceError::AlreadyExists) => {}
            Err(error) => return Err(format!("failed to install shop {shop}: {error}")),
        }

        let record = service
            .create_timer(
                &shop,
                NewTimer {
                    uuid: TimerUuid::new(),
                    timer,
                },
            )
            .await
            .map_err(|error| format!("failed to seed timer: {error}"))?;

        println!(
            "seeded {} for {} ({})",
            record.uuid,
            record.timer.product_id,
            record.timer.name.as_deref().unwrap_or("unnamed")
        );
    }

    Ok(())
}
