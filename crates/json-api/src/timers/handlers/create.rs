//! Create Timer Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use tracing::info;

use countdown_app::domain::timers::{data::NewTimer, records::TimerUuid};

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::models::{TimerRequest, TimerResponse},
};

/// Create Timer Handler
#[endpoint(
    tags("timers"),
    summary = "Create Timer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Timer created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid settings or window"),
        (status_code = StatusCode::CONFLICT, description = "Timer already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TimerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TimerResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_domain_or_401()?;

    let timer = json.into_inner().into_timer(&shop)?;

    let created = state
        .app
        .timers
        .create_timer(
            &shop,
            NewTimer {
                uuid: TimerUuid::new(),
                timer,
            },
        )
        .await?;

    res.add_header(LOCATION, format!("/api/timers/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    info!(shop = %shop, timer = %created.uuid, "created timer");

    Ok(Json(created.into()))
}
