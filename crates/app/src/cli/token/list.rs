use clap::Args;
use countdown_app::auth::PgAuthService;

use crate::cli::{connect, parse_shop};

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Shop whose tokens should be listed
    #[arg(long)]
    shop: String,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let shop = parse_shop(&args.shop)?;
    let pool = connect(&args.database_url).await?;

    let tokens = PgAuthService::new(pool)
        .list_api_tokens(&shop)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for shop {shop}");
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!(
            "last_used_at: {}",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
