//! Shop Records

use jiff::Timestamp;

use countdown::shops::ShopDomain;

/// Shop Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopRecord {
    /// Shop domain, the tenant key.
    pub domain: ShopDomain,

    /// Installation timestamp.
    pub created_at: Timestamp,
}
