//! Timers Repository

use std::{error::Error as StdError, str::FromStr};

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    query_as,
};

use countdown::{
    resolution::TimerQuery,
    shops::ShopDomain,
    timers::{Timer, TimerError, TimerSettings, TimerWindow, UrgencyTrigger},
};

use crate::domain::timers::records::{TimerRecord, TimerUuid};

const FIND_ACTIVE_TIMER_SQL: &str = include_str!("sql/find_active_timer.sql");
const LIST_TIMERS_SQL: &str = include_str!("sql/list_timers.sql");
const GET_TIMER_SQL: &str = include_str!("sql/get_timer.sql");
const CREATE_TIMER_SQL: &str = include_str!("sql/create_timer.sql");
const UPDATE_TIMER_SQL: &str = include_str!("sql/update_timer.sql");

type TimerQueryAs<'q> = QueryAs<'q, Postgres, TimerRecord, PgArguments>;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTimersRepository;

impl PgTimersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_active_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        query: &TimerQuery,
        now: Timestamp,
    ) -> Result<Option<TimerRecord>, sqlx::Error> {
        let candidates: Vec<String> = query
            .product()
            .candidates()
            .iter()
            .map(ToString::to_string)
            .collect();

        query_as::<Postgres, TimerRecord>(FIND_ACTIVE_TIMER_SQL)
            .bind(query.shop().as_str())
            .bind(candidates)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_timers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
    ) -> Result<Vec<TimerRecord>, sqlx::Error> {
        query_as::<Postgres, TimerRecord>(LIST_TIMERS_SQL)
            .bind(shop.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        timer: TimerUuid,
    ) -> Result<TimerRecord, sqlx::Error> {
        query_as::<Postgres, TimerRecord>(GET_TIMER_SQL)
            .bind(timer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: TimerUuid,
        timer: &Timer,
    ) -> Result<TimerRecord, sqlx::Error> {
        bind_document(query_as(CREATE_TIMER_SQL).bind(uuid.into_uuid()), timer)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: TimerUuid,
        timer: &Timer,
    ) -> Result<TimerRecord, sqlx::Error> {
        bind_document(query_as(UPDATE_TIMER_SQL).bind(uuid.into_uuid()), timer)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Bind the document columns, `$2` to `$13`, shared by inserts and rewrites.
fn bind_document<'q>(query: TimerQueryAs<'q>, timer: &'q Timer) -> TimerQueryAs<'q> {
    let settings = &timer.settings;

    query
        .bind(timer.shop_domain.as_str())
        .bind(timer.product_id.as_str())
        .bind(timer.name.as_deref())
        .bind(timer.description.as_deref())
        .bind(SqlxTimestamp::from(timer.window.start()))
        .bind(SqlxTimestamp::from(timer.window.end()))
        .bind(settings.color.as_str())
        .bind(settings.size.as_str())
        .bind(settings.position.as_str())
        .bind(settings.urgency_trigger_minutes.minutes())
        .bind(settings.urgency_notification_type.as_str())
        .bind(timer.is_active)
}

fn decode_error<E>(column: &'static str) -> impl FnOnce(E) -> sqlx::Error
where
    E: StdError + Send + Sync + 'static,
{
    move |error| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

fn parse_column<T>(row: &PgRow, column: &'static str) -> sqlx::Result<T>
where
    T: FromStr<Err = TimerError>,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(decode_error(column))
}

impl<'r> FromRow<'r, PgRow> for TimerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let window = TimerWindow::new(
            row.try_get::<SqlxTimestamp, _>("start_date")?.to_jiff(),
            row.try_get::<SqlxTimestamp, _>("end_date")?.to_jiff(),
        )
        .map_err(decode_error("end_date"))?;

        let urgency_trigger_minutes =
            UrgencyTrigger::new(row.try_get::<f64, _>("urgency_trigger_minutes")?)
                .map_err(decode_error("urgency_trigger_minutes"))?;

        let settings = TimerSettings {
            color: row.try_get("color")?,
            size: parse_column(row, "size")?,
            position: parse_column(row, "position")?,
            urgency_trigger_minutes,
            urgency_notification_type: parse_column(row, "urgency_notification_type")?,
        };

        let mut timer = Timer::new(
            row.try_get::<String, _>("shop_domain")?,
            row.try_get::<String, _>("product_id")?,
            window,
        )
        .map_err(decode_error("product_id"))?
        .with_settings(settings)
        .with_active(row.try_get("is_active")?);

        timer.name = row.try_get("name")?;
        timer.description = row.try_get("description")?;

        Ok(Self {
            uuid: TimerUuid::from_uuid(row.try_get("uuid")?),
            timer,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
