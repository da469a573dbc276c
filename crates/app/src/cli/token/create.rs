use clap::Args;
use countdown_app::auth::PgAuthService;

use crate::cli::{connect, parse_shop};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop domain that should own the token
    #[arg(long)]
    shop: String,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let shop = parse_shop(&args.shop)?;
    let pool = connect(&args.database_url).await?;

    let issued = PgAuthService::new(pool)
        .issue_api_token(&shop)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("shop_domain: {}", issued.metadata.shop_domain);
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
