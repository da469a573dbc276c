use clap::Args;
use countdown_app::{
    auth::PgAuthService,
    domain::shops::{PgShopsService, ShopsService, data::NewShop},
};

use crate::cli::{connect, parse_shop};

#[derive(Debug, Args)]
pub(crate) struct CreateShopArgs {
    /// Shop domain, e.g. `example.myshopify.com`
    #[arg(long)]
    domain: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateShopArgs) -> Result<(), String> {
    let domain = parse_shop(&args.domain)?;
    let pool = connect(&args.database_url).await?;

    let shop = PgShopsService::new(pool.clone())
        .create_shop(NewShop { domain })
        .await
        .map_err(|error| format!("failed to create shop: {error}"))?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(&shop.domain)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("shop_domain: {}", shop.domain);
    println!("shop_created_at: {}", shop.created_at);
    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
