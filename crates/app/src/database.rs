//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, query, query_scalar};
use thiserror::Error;

use countdown::shops::ShopDomain;

/// SQL used to set shop context for row-level security.
pub const SET_SHOP_CONTEXT_SQL: &str =
    "SELECT set_config('app.current_shop_domain', $1, true)";

/// SQL reporting whether the connected role skips row-level security.
const ROLE_BYPASSES_RLS_SQL: &str =
    "SELECT rolsuper OR rolbypassrls FROM pg_roles WHERE rolname = current_user";

/// Role check errors
#[derive(Debug, Error)]
pub enum RoleCheckError {
    /// The connected role is a superuser or has `BYPASSRLS`
    #[error("database role bypasses row-level security; connect as the application role")]
    BypassesRls,

    /// The check query failed
    #[error("failed to inspect database role")]
    Sql(#[from] sqlx::Error),
}

/// Connection pool wrapper that opens shop-scoped transactions.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    /// Wrap a connection pool
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for statements that are not shop-scoped.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a transaction and set shop context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting shop context fails.
    pub async fn begin_shop_transaction(
        &self,
        shop: &ShopDomain,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_SHOP_CONTEXT_SQL)
            .bind(shop.as_str())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Refuse roles that would ignore the shop isolation policies.
///
/// # Errors
///
/// Returns [`RoleCheckError::BypassesRls`] for superusers and `BYPASSRLS` roles.
pub async fn ensure_rls_enforced_role(pool: &PgPool) -> Result<(), RoleCheckError> {
    let bypasses: bool = query_scalar(ROLE_BYPASSES_RLS_SQL).fetch_one(pool).await?;

    if bypasses {
        return Err(RoleCheckError::BypassesRls);
    }

    Ok(())
}
