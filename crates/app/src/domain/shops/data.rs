//! Shop Data

use countdown::shops::ShopDomain;

/// New Shop Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShop {
    /// Domain identifying the shop.
    pub domain: ShopDomain,
}
