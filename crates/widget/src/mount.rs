//! Mount points and their configuration

use leptos::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use countdown::products::ProductReference;

use crate::{
    notice::{Notice, Unavailable},
    widget::CountdownWidget,
};

/// Elements the widget renders into
pub(crate) const MOUNT_SELECTOR: &str = "#countdown-timer-root, [data-countdown-timer]";

/// Storefront proxy path used when the block does not configure one
pub(crate) const DEFAULT_ENDPOINT: &str = "/apps/countdown/api/proxy/timer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum MountError {
    #[error("no product id on the mount point or the page")]
    MissingProductId,
}

/// What one mount point asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MountConfig {
    pub shop_domain: Option<String>,
    pub product: ProductReference,
    pub product_gid: String,
    pub endpoint: String,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl MountConfig {
    /// Read the configuration of a mount point.
    ///
    /// `attribute` returns the value of a `data-*` attribute and `analytics`
    /// the product id published by the storefront analytics object, which is
    /// only consulted when the mount point carries no product id.
    pub(crate) fn from_attributes(
        attribute: impl Fn(&str) -> Option<String>,
        analytics: impl FnOnce() -> Option<String>,
        origin: &str,
    ) -> Result<Self, MountError> {
        let product_id = present(attribute("data-product-id"))
            .or_else(|| present(analytics()))
            .ok_or(MountError::MissingProductId)?;

        let product =
            ProductReference::parse(&product_id).map_err(|_source| MountError::MissingProductId)?;

        let product_gid = present(attribute("data-product-gid"))
            .unwrap_or_else(|| product.gid().to_string());

        let endpoint = present(attribute("data-endpoint"))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            shop_domain: present(attribute("data-shop-domain")),
            product,
            product_gid,
            endpoint: absolute_endpoint(origin, &endpoint),
        })
    }
}

fn absolute_endpoint(origin: &str, endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        format!("{}{endpoint}", origin.trim_end_matches('/'))
    } else {
        endpoint.to_string()
    }
}

#[cfg(target_arch = "wasm32")]
fn analytics_product_id() -> Option<String> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let mut value = JsValue::from(web_sys::window()?);

    for key in ["ShopifyAnalytics", "meta", "product", "id"] {
        value = Reflect::get(&value, &JsValue::from_str(key)).ok()?;

        if value.is_undefined() || value.is_null() {
            return None;
        }
    }

    value
        .as_string()
        .or_else(|| value.as_f64().map(|id| format!("{id:.0}")))
}

#[cfg(not(target_arch = "wasm32"))]
fn analytics_product_id() -> Option<String> {
    None
}

/// Render a widget into every mount point on the page.
pub(crate) fn mount_all() {
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        warn!("no window; countdown widget not mounted");
        return;
    };

    let Some(document) = window.document() else {
        warn!("no document; countdown widget not mounted");
        return;
    };

    let Ok(targets) = document.query_selector_all(MOUNT_SELECTOR) else {
        warn!("invalid mount selector {MOUNT_SELECTOR}");
        return;
    };

    let origin = window.location().origin().unwrap_or_default();

    debug!("mounting {} countdown widget(s)", targets.length());

    for index in 0..targets.length() {
        let Some(element) = targets
            .item(index)
            .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            continue;
        };

        let config = MountConfig::from_attributes(
            |name| element.get_attribute(name),
            analytics_product_id,
            &origin,
        );

        match config {
            Ok(config) => {
                leptos::mount::mount_to(element, move || view! { <CountdownWidget config=config /> })
                    .forget();
            }
            Err(error) => {
                warn!("countdown widget not configured: {error}");

                leptos::mount::mount_to(element, || {
                    view! { <Notice reason=Unavailable::MissingProduct /> }
                })
                .forget();
            }
        }
    }
}
