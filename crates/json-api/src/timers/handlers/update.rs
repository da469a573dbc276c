//! Update Timer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use countdown_app::domain::timers::data::TimerUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::models::{TimerRequest, TimerResponse},
};

/// Update Timer Handler
///
/// Replaces the whole timer document.
#[endpoint(
    tags("timers"),
    summary = "Update Timer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Timer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Timer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid settings or window"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "timers.update",
    skip(timer, json, depot, res),
    fields(
        shop_domain = tracing::field::Empty,
        timer_uuid = tracing::field::Empty,
        product_id = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    timer: PathParam<Uuid>,
    json: JsonBody<TimerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TimerResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_domain_or_401()?;
    let timer = timer.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("shop_domain", tracing::field::display(&shop));
    span.record("timer_uuid", tracing::field::display(timer));
    span.record("product_id", request.product_id.as_str());

    let update = TimerUpdate {
        timer: request.into_timer(&shop)?,
    };

    let updated = state
        .app
        .timers
        .update_timer(&shop, timer.into(), update)
        .await?;

    res.add_header(LOCATION, format!("/api/timers/{timer}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::OK);

    tracing::info!(timer_uuid = %timer, "updated timer");

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use countdown_app::domain::timers::{MockTimersService, TimersServiceError, records::TimerUuid};

    use crate::{
        errors::ErrorResponse,
        test_helpers::{TEST_SHOP, make_record, timers_service},
    };

    use super::*;

    fn make_service(timers: MockTimersService) -> Service {
        timers_service(timers, Router::with_path("api/timers/{timer}").put(handler))
    }

    fn strict(timers: &mut MockTimersService) {
        timers.expect_find_active_timer().never();
        timers.expect_list_timers().never();
        timers.expect_get_timer().never();
        timers.expect_create_timer().never();
    }

    fn body() -> serde_json::Value {
        json!({
            "productId": "gid://shopify/Product/555",
            "name": "Renamed",
            "startDate": "2026-10-16T10:00:00Z",
            "endDate": "2026-10-16T12:00:00Z",
            "isActive": false,
        })
    }

    #[tokio::test]
    async fn test_update_timer_success() -> TestResult {
        let uuid = TimerUuid::new();
        let mut record = make_record(uuid, "gid://shopify/Product/555")?;

        record.timer = record.timer.with_name("Renamed").with_active(false);

        let mut timers = MockTimersService::new();

        timers
            .expect_update_timer()
            .once()
            .withf(move |shop, u, update| {
                shop.as_str() == TEST_SHOP
                    && *u == uuid
                    && update.timer.name.as_deref() == Some("Renamed")
                    && !update.timer.is_active
            })
            .return_once(move |_, _, _| Ok(record));

        strict(&mut timers);

        let mut res = TestClient::put(format!("http://example.com/api/timers/{uuid}"))
            .json(&body())
            .send(&make_service(timers))
            .await;

        let response: TimerResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(location, Some(format!("/api/timers/{uuid}").as_str()));
        assert_eq!(response.name.as_deref(), Some("Renamed"));
        assert!(!response.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_timer_returns_404() -> TestResult {
        let uuid = TimerUuid::new();

        let mut timers = MockTimersService::new();

        timers
            .expect_update_timer()
            .once()
            .withf(move |_, u, _| *u == uuid)
            .return_once(|_, _, _| Err(TimersServiceError::NotFound));

        strict(&mut timers);

        let res = TestClient::put(format!("http://example.com/api/timers/{uuid}"))
            .json(&body())
            .send(&make_service(timers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_invalid_uuid_returns_400() -> TestResult {
        let mut timers = MockTimersService::new();

        timers.expect_update_timer().never();

        strict(&mut timers);

        let res = TestClient::put("http://example.com/api/timers/123")
            .json(&body())
            .send(&make_service(timers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_fields_returns_json_400() -> TestResult {
        let mut timers = MockTimersService::new();

        timers.expect_update_timer().never();

        strict(&mut timers);

        let mut res = TestClient::put(format!("http://example.com/api/timers/{}", TimerUuid::new()))
            .json(&json!({ "name": "No product or window" }))
            .send(&make_service(timers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!body.error.is_empty(), "error message must be present");

        Ok(())
    }
}
