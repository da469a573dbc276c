//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;

use countdown::{
    shops::ShopDomain,
    timers::{Timer, TimerWindow},
};

use crate::{
    domain::timers::{
        TimersService,
        data::NewTimer,
        records::{TimerRecord, TimerUuid},
    },
    test::TestContext,
};

/// Window from `start_mins` to `end_mins` minutes relative to `now`.
pub(crate) fn window(now: Timestamp, start_mins: i64, end_mins: i64) -> TestResult<TimerWindow> {
    Ok(TimerWindow::new(
        now.checked_add(SignedDuration::from_mins(start_mins))?,
        now.checked_add(SignedDuration::from_mins(end_mins))?,
    )?)
}

pub(crate) async fn create_timer(
    ctx: &TestContext,
    shop: &ShopDomain,
    product: &str,
    window: TimerWindow,
) -> TestResult<TimerRecord> {
    let timer = Timer::new(shop.as_str(), product, window)?;

    Ok(ctx
        .timers
        .create_timer(
            shop,
            NewTimer {
                uuid: TimerUuid::new(),
                timer,
            },
        )
        .await?)
}
