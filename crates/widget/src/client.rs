//! Timer Client
//!
//! Fetches the active timer through the storefront proxy. The proxy is asked
//! with the compound product id first and, if that does not produce a timer,
//! once more with the bare numeric id.

use reqwest::{Client, StatusCode};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use countdown::timers::Timer;

use crate::mount::MountConfig;

/// Failure of a single proxy request
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy answered with a non-success status
    #[error("proxy answered {0}")]
    Status(StatusCode),

    /// The body was not a timer document
    #[error("invalid timer document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Product ids to try, in order, without repeats.
pub(crate) fn product_attempts(config: &MountConfig) -> SmallVec<[&str; 2]> {
    let mut attempts: SmallVec<[&str; 2]> = SmallVec::new();

    for product in [config.product_gid.as_str(), config.product.numeric()] {
        if !attempts.contains(&product) {
            attempts.push(product);
        }
    }

    attempts
}

/// Interpret a proxy response.
pub(crate) fn parse_response(status: StatusCode, body: &str) -> Result<Timer, FetchError> {
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    Ok(serde_json::from_str(body)?)
}

async fn request(
    client: &Client,
    config: &MountConfig,
    product: &str,
) -> Result<Timer, FetchError> {
    let mut query: SmallVec<[(&str, &str); 2]> = SmallVec::new();

    if let Some(shop) = config.shop_domain.as_deref() {
        query.push(("shop", shop));
    }

    query.push(("product", product));

    let response = client
        .get(&config.endpoint)
        .query(query.as_slice())
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    parse_response(status, &body)
}

/// Try each product id in turn until one produces a timer.
///
/// # Errors
///
/// Returns the error of the last attempt when no attempt produced a timer.
pub(crate) async fn first_timer<'a, F, Fut>(
    attempts: &[&'a str],
    mut fetch: F,
) -> Result<Timer, FetchError>
where
    F: FnMut(&'a str) -> Fut,
    Fut: Future<Output = Result<Timer, FetchError>>,
{
    let mut attempts = attempts.iter().copied().peekable();
    let mut last_error = None;

    while let Some(product) = attempts.next() {
        match fetch(product).await {
            Ok(timer) => {
                debug!("timer for {product} ends at {}", timer.window.end());

                return Ok(timer);
            }
            Err(error) if attempts.peek().is_some() => {
                debug!("no timer for {product} ({error}); retrying");

                last_error = Some(error);
            }
            Err(error) => {
                warn!("no timer for {product}: {error}");

                last_error = Some(error);
            }
        }
    }

    Err(last_error.unwrap_or(FetchError::Status(StatusCode::NOT_FOUND)))
}

/// Resolve the timer for a mount point.
///
/// # Errors
///
/// Returns the error of the last attempt when no attempt produced a timer.
pub(crate) async fn fetch_timer(client: &Client, config: &MountConfig) -> Result<Timer, FetchError> {
    let attempts = product_attempts(config);

    first_timer(&attempts, |product| request(client, config, product)).await
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use jiff::{SignedDuration, Timestamp};
    use serde_json::json;
    use testresult::TestResult;

    use countdown::{
        products::ProductReference,
        timers::{DisplaySize, TimerWindow, UrgencyNotification, UrgencyTrigger},
    };

    use super::*;

    fn config(product: &str, gid: Option<&str>) -> TestResult<MountConfig> {
        let product = ProductReference::parse(product)?;

        Ok(MountConfig {
            shop_domain: Some("demo.myshopify.com".to_string()),
            product_gid: gid.map_or_else(|| product.gid().to_string(), str::to_string),
            product,
            endpoint: "https://demo.myshopify.com/apps/countdown/api/proxy/timer".to_string(),
        })
    }

    #[test]
    fn compound_id_is_tried_before_numeric() -> TestResult {
        let config = config("555", None)?;

        assert_eq!(
            product_attempts(&config).as_slice(),
            ["gid://shopify/Product/555", "555"]
        );

        Ok(())
    }

    #[test]
    fn attempts_do_not_repeat() -> TestResult {
        let config = config("555", Some("555"))?;

        assert_eq!(product_attempts(&config).as_slice(), ["555"]);

        Ok(())
    }

    #[test]
    fn non_success_status_is_an_error() {
        let result = parse_response(StatusCode::NOT_FOUND, r#"{"error":"No active timer found"}"#);

        assert!(
            matches!(result, Err(FetchError::Status(StatusCode::NOT_FOUND))),
            "expected status error, got {result:?}"
        );
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let result = parse_response(StatusCode::OK, "<html>");

        assert!(
            matches!(result, Err(FetchError::Parse(_))),
            "expected parse error, got {result:?}"
        );
    }

    #[test]
    fn proxy_documents_parse_into_timers() -> TestResult {
        let body = json!({
            "id": "0192a3b4-0000-7000-8000-000000000000",
            "shopDomain": "demo.myshopify.com",
            "productId": "gid://shopify/Product/555",
            "name": "Flash sale",
            "description": "Ends tonight",
            "startDate": "2026-10-16T10:00:00Z",
            "endDate": "2026-10-16T12:00:00Z",
            "settings": {
                "color": "#00ff00",
                "size": "Large",
                "position": "Top",
                "urgencyTriggerMinutes": 7.5,
                "urgencyNotificationType": "Notification banner",
            },
            "isActive": true,
            "createdAt": "2026-10-16T09:00:00Z",
            "updatedAt": "2026-10-16T09:00:00Z",
        });

        let timer = parse_response(StatusCode::OK, &body.to_string())?;

        assert_eq!(timer.description.as_deref(), Some("Ends tonight"));
        assert_eq!(
            timer.window.end(),
            "2026-10-16T12:00:00Z".parse::<Timestamp>()?
        );
        assert_eq!(timer.settings.color, "#00ff00");
        assert_eq!(timer.settings.size, DisplaySize::Large);
        assert_eq!(
            timer.settings.urgency_trigger_minutes,
            UrgencyTrigger::new(7.5)?
        );
        assert_eq!(
            timer.settings.urgency_notification_type,
            UrgencyNotification::NotificationBanner
        );

        Ok(())
    }

    fn timer() -> TestResult<Timer> {
        let start = Timestamp::from_second(1_000_000)?;
        let window = TimerWindow::new(start, start.checked_add(SignedDuration::from_hours(2))?)?;

        Ok(Timer::new("demo.myshopify.com", "555", window)?)
    }

    #[tokio::test]
    async fn first_success_stops_further_requests() -> TestResult {
        let timer = timer()?;
        let mut requested = Vec::new();

        let result = first_timer(&["gid://shopify/Product/555", "555"], |product| {
            requested.push(product);

            ready(Ok(timer.clone()))
        })
        .await?;

        assert_eq!(result, timer);
        assert_eq!(requested, ["gid://shopify/Product/555"]);

        Ok(())
    }

    #[tokio::test]
    async fn numeric_retry_follows_a_failed_compound_attempt() -> TestResult {
        let timer = timer()?;
        let mut requested = Vec::new();

        let result = first_timer(&["gid://shopify/Product/555", "555"], |product| {
            requested.push(product);

            ready(if product == "555" {
                Ok(timer.clone())
            } else {
                Err(FetchError::Status(StatusCode::NOT_FOUND))
            })
        })
        .await?;

        assert_eq!(result, timer);
        assert_eq!(requested, ["gid://shopify/Product/555", "555"]);

        Ok(())
    }

    #[tokio::test]
    async fn exhausted_attempts_return_the_last_error() {
        let mut requested = Vec::new();

        let result = first_timer(&["gid://shopify/Product/555", "555"], |product| {
            requested.push(product);

            ready(Err(if product == "555" {
                FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR)
            } else {
                FetchError::Status(StatusCode::NOT_FOUND)
            }))
        })
        .await;

        assert!(
            matches!(
                result,
                Err(FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR))
            ),
            "expected the numeric attempt's error, got {result:?}"
        );
        assert_eq!(requested, ["gid://shopify/Product/555", "555"]);
    }
}
