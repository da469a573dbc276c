use clap::{Args, Subcommand};
use countdown_app::{database::Db, domain::timers::PgTimersService};

use crate::cli::connect;

mod create;
mod list;
mod seed;

#[derive(Debug, Args)]
pub(crate) struct TimerCommand {
    #[command(subcommand)]
    command: TimerSubcommand,
}

#[derive(Debug, Subcommand)]
enum TimerSubcommand {
    Create(create::CreateTimerArgs),
    List(list::ListTimersArgs),
    Seed(seed::SeedTimersArgs),
}

pub(crate) async fn run(command: TimerCommand) -> Result<(), String> {
    match command.command {
        TimerSubcommand::Create(args) => create::run(args).await,
        TimerSubcommand::List(args) => list::run(args).await,
        TimerSubcommand::Seed(args) => seed::run(args).await,
    }
}

async fn timers_service(database_url: &str) -> Result<PgTimersService, String> {
    Ok(PgTimersService::new(Db::new(connect(database_url).await?)))
}
