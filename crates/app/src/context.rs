//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, RoleCheckError},
    domain::timers::{PgTimersService, TimersService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error(transparent)]
    Role(#[from] RoleCheckError),
}

#[derive(Clone)]
pub struct AppContext {
    pub timers: Arc<dyn TimersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// role would bypass row-level security.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool).await?;

        let db = Db::new(pool.clone());

        Ok(Self {
            timers: Arc::new(PgTimersService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
