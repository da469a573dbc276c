//! Timers service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use countdown::{resolution::TimerQuery, shops::ShopDomain, timers::Timer};

use crate::{
    database::Db,
    domain::timers::{
        data::{NewTimer, TimerUpdate},
        errors::TimersServiceError,
        records::{TimerRecord, TimerUuid},
        repository::PgTimersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgTimersService {
    db: Db,
    repository: PgTimersRepository,
}

impl PgTimersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTimersRepository::new(),
        }
    }
}

fn ensure_owned_by(shop: &ShopDomain, timer: &Timer) -> Result<(), TimersServiceError> {
    if timer.shop_domain == shop.as_str() {
        Ok(())
    } else {
        Err(TimersServiceError::ShopMismatch)
    }
}

#[async_trait]
impl TimersService for PgTimersService {
    async fn find_active_timer(
        &self,
        query: &TimerQuery,
        now: Timestamp,
    ) -> Result<Option<TimerRecord>, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(query.shop()).await?;

        let timer = self
            .repository
            .find_active_timer(&mut tx, query, now)
            .await?;

        tx.commit().await?;

        Ok(timer)
    }

    async fn list_timers(&self, shop: &ShopDomain) -> Result<Vec<TimerRecord>, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(shop).await?;

        let timers = self.repository.list_timers(&mut tx, shop).await?;

        tx.commit().await?;

        Ok(timers)
    }

    async fn get_timer(
        &self,
        shop: &ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(shop).await?;

        let timer = self.repository.get_timer(&mut tx, timer).await?;

        tx.commit().await?;

        Ok(timer)
    }

    async fn create_timer(
        &self,
        shop: &ShopDomain,
        timer: NewTimer,
    ) -> Result<TimerRecord, TimersServiceError> {
        ensure_owned_by(shop, &timer.timer)?;

        let mut tx = self.db.begin_shop_transaction(shop).await?;

        let created = self
            .repository
            .create_timer(&mut tx, timer.uuid, &timer.timer)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_timer(
        &self,
        shop: &ShopDomain,
        timer: TimerUuid,
        update: TimerUpdate,
    ) -> Result<TimerRecord, TimersServiceError> {
        ensure_owned_by(shop, &update.timer)?;

        let mut tx = self.db.begin_shop_transaction(shop).await?;

        let updated = self
            .repository
            .update_timer(&mut tx, timer, &update.timer)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait TimersService: Send + Sync {
    /// Resolves the timer a storefront should display for the queried
    /// product, accepting either product id form. The newest eligible timer
    /// wins.
    async fn find_active_timer(
        &self,
        query: &TimerQuery,
        now: Timestamp,
    ) -> Result<Option<TimerRecord>, TimersServiceError>;

    /// Retrieves every timer of a shop, newest first.
    async fn list_timers(&self, shop: &ShopDomain) -> Result<Vec<TimerRecord>, TimersServiceError>;

    /// Retrieve a single timer.
    async fn get_timer(
        &self,
        shop: &ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError>;

    /// Creates a timer for the shop.
    async fn create_timer(
        &self,
        shop: &ShopDomain,
        timer: NewTimer,
    ) -> Result<TimerRecord, TimersServiceError>;

    /// Replaces a timer's document.
    async fn update_timer(
        &self,
        shop: &ShopDomain,
        timer: TimerUuid,
        update: TimerUpdate,
    ) -> Result<TimerRecord, TimersServiceError>;
}
