//! Storefront Timer Resolver

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::*};
use tracing::{debug, error, info};

use countdown::resolution::TimerQuery;

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{LookupOutcome, observe_lookup},
    state::State,
    timers::models::TimerResponse,
};

/// Storefront Timer Handler
///
/// Returns the timer currently running for a product, matching the product
/// in either its numeric or `gid://shopify/Product/` form.
#[endpoint(
    tags("proxy"),
    summary = "Resolve Active Timer",
    responses(
        (status_code = StatusCode::OK, description = "Active timer"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing shop or product parameter"),
        (status_code = StatusCode::NOT_FOUND, description = "No active timer found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal server error"),
    ),
)]
pub(crate) async fn handler(
    shop: QueryParam<String, false>,
    product: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TimerResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let shop = shop.into_inner();
    let product = product.into_inner();

    let query = TimerQuery::from_params(shop.as_deref(), product.as_deref()).map_err(|error| {
        observe_lookup(LookupOutcome::Invalid);

        ApiError::from(error)
    })?;

    debug!(
        shop = %query.shop(),
        candidates = ?query.product().candidates(),
        "resolving storefront timer"
    );

    match state.app.timers.find_active_timer(&query, Timestamp::now()).await {
        Ok(Some(record)) => {
            observe_lookup(LookupOutcome::Found);

            info!(
                shop = %query.shop(),
                product = query.product().raw(),
                timer = %record.uuid,
                "active timer found"
            );

            Ok(Json(record.into()))
        }
        Ok(None) => {
            observe_lookup(LookupOutcome::NotFound);

            info!(
                shop = %query.shop(),
                product = query.product().raw(),
                "no active timer"
            );

            Err(ApiError::not_found("No active timer found"))
        }
        Err(source) => {
            observe_lookup(LookupOutcome::Error);

            error!("failed to resolve storefront timer: {source}");

            Err(ApiError::internal())
        }
    }
}
