//! Shops Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use countdown::shops::ShopDomain;

use crate::domain::shops::{data::NewShop, records::ShopRecord};

const CREATE_SHOP_SQL: &str = include_str!("sql/create_shop.sql");

/// PostgreSQL-backed shops repository.
#[derive(Debug, Clone)]
pub(crate) struct PgShopsRepository {
    pool: PgPool,
}

impl PgShopsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_shop(&self, shop: NewShop) -> Result<ShopRecord, sqlx::Error> {
        query_as::<Postgres, ShopRecord>(CREATE_SHOP_SQL)
            .bind(shop.domain.as_str())
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ShopRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let domain: String = row.try_get("domain")?;

        Ok(Self {
            domain: ShopDomain::parse(&domain).map_err(|error| sqlx::Error::ColumnDecode {
                index: "domain".to_string(),
                source: Box::new(error),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
