//! Get Timer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*, state::State, timers::models::TimerResponse};

/// Get Timer Handler
///
/// Returns a single timer of the shop.
#[endpoint(
    tags("timers"),
    summary = "Get Timer",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    timer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TimerResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_domain_or_401()?;

    let timer = state
        .app
        .timers
        .get_timer(&shop, timer.into_inner().into())
        .await?;

    Ok(Json(timer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use countdown_app::domain::timers::{MockTimersService, TimersServiceError, records::TimerUuid};

    use crate::{
        errors::ErrorResponse,
        test_helpers::{TEST_SHOP, make_record, timers_service},
    };

    use super::*;

    fn make_service(timers: MockTimersService) -> Service {
        timers_service(timers, Router::with_path("timers/{timer}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let uuid = TimerUuid::new();
        let record = make_record(uuid, "555")?;

        let mut timers = MockTimersService::new();

        timers
            .expect_get_timer()
            .once()
            .withf(move |shop, u| shop.as_str() == TEST_SHOP && *u == uuid)
            .return_once(move |_, _| Ok(record));

        timers.expect_find_active_timer().never();
        timers.expect_list_timers().never();
        timers.expect_create_timer().never();
        timers.expect_update_timer().never();

        let mut res = TestClient::get(format!("http://example.com/timers/{uuid}"))
            .send(&make_service(timers))
            .await;

        let body: TimerResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.shop_domain, TEST_SHOP);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_timer_returns_404() -> TestResult {
        let uuid = TimerUuid::new();

        let mut timers = MockTimersService::new();

        timers
            .expect_get_timer()
            .once()
            .withf(move |_, u| *u == uuid)
            .return_once(|_, _| Err(TimersServiceError::NotFound));

        timers.expect_find_active_timer().never();
        timers.expect_list_timers().never();
        timers.expect_create_timer().never();
        timers.expect_update_timer().never();

        let mut res = TestClient::get(format!("http://example.com/timers/{uuid}"))
            .send(&make_service(timers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.error, "Timer not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_uuid_returns_400() -> TestResult {
        let mut timers = MockTimersService::new();

        timers.expect_get_timer().never();
        timers.expect_find_active_timer().never();
        timers.expect_list_timers().never();
        timers.expect_create_timer().never();
        timers.expect_update_timer().never();

        let res = TestClient::get("http://example.com/timers/123")
            .send(&make_service(timers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
