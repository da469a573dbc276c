//! Integration test for the bundled demo timer set.

use jiff::Timestamp;
use testresult::TestResult;

use countdown::{fixtures::Fixture, prelude::*};

#[test]
fn demo_set_resolves_live_timers_only() -> TestResult {
    let now = Timestamp::from_second(1_700_000_000)?;
    let timers = Fixture::new().timers("demo", now)?;

    assert_eq!(timers.len(), 4);

    let resolve = |product: &str| -> TestResult<Option<String>> {
        let query = TimerQuery::from_params(Some("demo.myshopify.com"), Some(product))?;

        Ok(select_active(&timers, &query, now).and_then(|timer| timer.name.clone()))
    };

    assert_eq!(resolve("555")?.as_deref(), Some("Weekend flash sale"));
    assert_eq!(resolve("gid://shopify/Product/777")?.as_deref(), Some("Last call"));
    assert_eq!(resolve("888")?, None, "future timer must not resolve");
    assert_eq!(resolve("999")?, None, "inactive timer must not resolve");

    Ok(())
}
