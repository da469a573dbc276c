//! Timer Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::models::TimersResponse,
};

/// Timer Index Handler
///
/// Returns the shop's timers, newest first.
#[endpoint(
    tags("timers"),
    summary = "List Timers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TimersResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_domain_or_401()?;

    let timers = state.app.timers.list_timers(&shop).await?;

    Ok(Json(TimersResponse {
        timers: timers.into_iter().map(Into::into).collect(),
    }))
}
