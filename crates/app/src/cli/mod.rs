use clap::{Parser, Subcommand};
use sqlx::PgPool;

use countdown::shops::ShopDomain;
use countdown_app::database;

mod db;
mod shop;
mod timer;
mod token;

#[derive(Debug, Parser)]
#[command(name = "countdown-app", about = "Countdown timer administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Shop(shop::ShopCommand),
    Token(token::TokenCommand),
    Timer(timer::TimerCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Shop(command) => shop::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Timer(command) => timer::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

pub(crate) async fn connect(database_url: &str) -> Result<PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}

pub(crate) fn parse_shop(domain: &str) -> Result<ShopDomain, String> {
    ShopDomain::parse(domain).map_err(|error| format!("invalid shop domain: {error}"))
}
