//! Timer Resolution
//!
//! Rules for picking the single timer a storefront should display for a
//! product. Storage backends apply the same rules in their own query language;
//! [`select_active`] applies them to timers already in memory.

use jiff::Timestamp;
use thiserror::Error;

use crate::{products::ProductReference, shops::ShopDomain, timers::Timer};

/// Resolution request errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// `shop` or `product` absent or blank
    #[error("Missing shop or product parameter")]
    MissingParameter,
}

/// A validated "which timer is live for this product?" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerQuery {
    shop: ShopDomain,
    product: ProductReference,
}

impl TimerQuery {
    /// Create a query from already-parsed parts
    pub fn new(shop: ShopDomain, product: ProductReference) -> Self {
        Self { shop, product }
    }

    /// Build a query from raw request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::MissingParameter`] if either parameter is
    /// absent or blank.
    pub fn from_params(shop: Option<&str>, product: Option<&str>) -> Result<Self, ResolutionError> {
        let shop = shop
            .and_then(|shop| ShopDomain::parse(shop).ok())
            .ok_or(ResolutionError::MissingParameter)?;

        let product = product
            .and_then(|product| ProductReference::parse(product).ok())
            .ok_or(ResolutionError::MissingParameter)?;

        Ok(Self { shop, product })
    }

    /// Requested shop
    pub fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Requested product
    pub fn product(&self) -> &ProductReference {
        &self.product
    }

    /// Whether `timer` satisfies this query at `now`.
    pub fn accepts(&self, timer: &Timer, now: Timestamp) -> bool {
        timer.shop_domain == self.shop.as_str()
            && self.product.matches(&timer.product_id)
            && timer.is_eligible(now)
    }
}

/// Pick the timer to display from timers listed in creation order.
///
/// When several timers qualify, the most recently created one wins.
pub fn select_active<'a>(
    timers: impl IntoIterator<Item = &'a Timer>,
    query: &TimerQuery,
    now: Timestamp,
) -> Option<&'a Timer> {
    timers
        .into_iter()
        .filter(|timer| query.accepts(timer, now))
        .last()
}
