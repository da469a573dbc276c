//! Test helpers.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use countdown::{
    shops::ShopDomain,
    timers::{Timer, TimerWindow},
};
use countdown_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::timers::{
        MockTimersService,
        records::{TimerRecord, TimerUuid},
    },
};

use crate::{errors::catcher, extensions::*, state::State};

pub(crate) const TEST_SHOP: &str = "demo.myshopify.com";

pub(crate) fn test_shop() -> ShopDomain {
    ShopDomain::parse(TEST_SHOP).expect("test shop domain is valid")
}

#[salvo::handler]
pub(crate) async fn inject_shop(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_shop_domain(test_shop());
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn strict_timers_mock() -> MockTimersService {
    let mut timers = MockTimersService::new();

    timers.expect_find_active_timer().never();
    timers.expect_list_timers().never();
    timers.expect_get_timer().never();
    timers.expect_create_timer().never();
    timers.expect_update_timer().never();

    timers
}

pub(crate) fn app_context(timers: MockTimersService, auth: MockAuthService) -> AppContext {
    AppContext {
        timers: Arc::new(timers),
        auth: Arc::new(auth),
    }
}

fn state(timers: MockTimersService, auth: MockAuthService) -> Arc<State> {
    State::from_app_context(app_context(timers, auth))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_timers_mock(), auth)
}

/// Storefront routes: no authenticated shop.
pub(crate) fn proxy_service(timers: MockTimersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(timers, strict_auth_mock())))
            .push(route),
    )
    .catcher(catcher())
}

/// Admin routes, authenticated as [`TEST_SHOP`].
pub(crate) fn timers_service(timers: MockTimersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(timers, strict_auth_mock())))
            .hoop(inject_shop)
            .push(route),
    )
    .catcher(catcher())
}

pub(crate) fn make_record(uuid: TimerUuid, product: &str) -> TestResult<TimerRecord> {
    let now = Timestamp::now();

    let window = TimerWindow::new(
        now.checked_sub(SignedDuration::from_hours(1))?,
        now.checked_add(SignedDuration::from_hours(1))?,
    )?;

    Ok(TimerRecord {
        uuid,
        timer: Timer::new(TEST_SHOP, product, window)?,
        created_at: now,
        updated_at: now,
    })
}
