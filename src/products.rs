//! Products
//!
//! Shopify refers to a product either by its bare numeric id (`555`) or by its
//! compound global id (`gid://shopify/Product/555`). Timers may be stored in
//! either form and storefronts may ask in either form, so lookups go through a
//! [`ProductReference`] that knows all of them.

use smallvec::SmallVec;
use thiserror::Error;

/// Prefix of a compound product identifier
pub const PRODUCT_GID_PREFIX: &str = "gid://shopify/Product/";

const GID_SCHEME: &str = "gid://";

/// Product reference errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductReferenceError {
    /// Blank identifier
    #[error("product identifier is required")]
    Empty,
}

/// A product identifier in every form a timer may have been stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductReference {
    raw: String,
    numeric: String,
    gid: String,
}

impl ProductReference {
    /// Parse a product identifier given in either form.
    ///
    /// # Errors
    ///
    /// Returns [`ProductReferenceError::Empty`] when the identifier is blank.
    pub fn parse(raw: &str) -> Result<Self, ProductReferenceError> {
        let raw = raw.trim();

        if raw.is_empty() {
            return Err(ProductReferenceError::Empty);
        }

        let numeric = raw.strip_prefix(PRODUCT_GID_PREFIX).unwrap_or(raw);

        let gid = if raw.starts_with(GID_SCHEME) {
            raw.to_string()
        } else {
            format!("{PRODUCT_GID_PREFIX}{raw}")
        };

        Ok(Self {
            raw: raw.to_string(),
            numeric: numeric.to_string(),
            gid,
        })
    }

    /// Identifier exactly as given
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Identifier with the compound prefix removed
    pub fn numeric(&self) -> &str {
        &self.numeric
    }

    /// Identifier in compound form
    pub fn gid(&self) -> &str {
        &self.gid
    }

    /// Distinct stored forms that refer to this product: raw, numeric, compound.
    pub fn candidates(&self) -> SmallVec<[&str; 3]> {
        let mut candidates: SmallVec<[&str; 3]> = SmallVec::new();

        for candidate in [self.raw.as_str(), self.numeric.as_str(), self.gid.as_str()] {
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }

        candidates
    }

    /// Whether a stored product identifier refers to this product.
    pub fn matches(&self, stored: &str) -> bool {
        self.candidates().contains(&stored)
    }
}
