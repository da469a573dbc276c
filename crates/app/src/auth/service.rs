//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use countdown::shops::ShopDomain;

use crate::auth::{
    ApiTokenMetadata, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken,
    build_verifier_input, format_api_token, generate_api_token_secret, hash_verifier_input,
    parse_api_token, repository::PgAuthRepository, verifier_matches,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the shop is not installed or database insertion fails.
    pub async fn issue_api_token(
        &self,
        shop: &ShopDomain,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash =
            hash_verifier_input(&build_verifier_input(&token_uuid, version, shop, &secret));

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                shop_domain: shop.clone(),
                version,
                token_hash,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given shop.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        shop: &ShopDomain,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens_by_shop(shop).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<ShopDomain, AuthServiceError> {
        let parsed_token =
            parse_api_token(bearer_token).map_err(|_parse_error| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let computed = hash_verifier_input(&build_verifier_input(
            &parsed_token.token_uuid,
            parsed_token.version,
            &token.shop_domain,
            &parsed_token.secret,
        ));

        if !verifier_matches(&computed, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!(%error, token_uuid = %parsed_token.token_uuid, "failed to record token use");
        }

        Ok(token.shop_domain)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve the shop a bearer token was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<ShopDomain, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_as_its_shop() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let issued = auth.issue_api_token(&ctx.shop).await?;

        assert_eq!(issued.metadata.shop_domain, ctx.shop);
        assert!(issued.metadata.revoked_at.is_none());

        let shop = auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(shop, ctx.shop);

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let issued = auth.issue_api_token(&ctx.shop).await?;

        assert!(auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!auth.revoke_api_token(issued.metadata.uuid).await?, "second revoke is a no-op");

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let issued = auth.issue_api_token(&ctx.shop).await?;
        let (id, _secret) = issued.token.split_once('.').ok_or("token has a secret")?;
        let forged = format!("{id}.{}", "00".repeat(32));

        let result = auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_shop_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = PgAuthService::new(ctx.db.pool().clone());

        let result = auth
            .issue_api_token(&ShopDomain::parse("missing.myshopify.com")?)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownShop)),
            "expected UnknownShop, got {result:?}"
        );

        Ok(())
    }
}
