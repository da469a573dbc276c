//! Shops service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::shops::{
    data::NewShop, errors::ShopsServiceError, records::ShopRecord,
    repository::PgShopsRepository,
};

/// PostgreSQL-backed [`ShopsService`].
#[derive(Debug, Clone)]
pub struct PgShopsService {
    repository: PgShopsRepository,
}

impl PgShopsService {
    /// Create a service over `pool`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgShopsRepository::new(pool),
        }
    }
}

#[async_trait]
impl ShopsService for PgShopsService {
    async fn create_shop(&self, shop: NewShop) -> Result<ShopRecord, ShopsServiceError> {
        self.repository
            .create_shop(shop)
            .await
            .map_err(Into::into)
    }
}

#[automock]
#[async_trait]
/// Shop persistence operations.
pub trait ShopsService: Send + Sync {
    /// Installs a new shop.
    async fn create_shop(&self, shop: NewShop) -> Result<ShopRecord, ShopsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use countdown::shops::ShopDomain;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_shop_returns_domain_and_timestamp() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgShopsService::new(ctx.db.pool().clone());

        let before = Timestamp::now();

        let shop = svc
            .create_shop(NewShop {
                domain: ShopDomain::parse("acme.myshopify.com")?,
            })
            .await?;

        assert_eq!(shop.domain.as_str(), "acme.myshopify.com");
        assert!(shop.created_at >= before, "created_at is set by the database");

        Ok(())
    }

    #[tokio::test]
    async fn create_shop_duplicate_domain_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let svc = PgShopsService::new(ctx.db.pool().clone());
        let domain = ShopDomain::parse("twice.myshopify.com")?;

        svc.create_shop(NewShop {
            domain: domain.clone(),
        })
        .await?;

        let result = svc.create_shop(NewShop { domain }).await;

        assert!(
            matches!(result, Err(ShopsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
