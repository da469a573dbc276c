//! Shops

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shop domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopDomainError {
    /// Blank domain
    #[error("shop domain is required")]
    Empty,
}

/// Tenant identifier, e.g. `example.myshopify.com`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Parse a shop domain, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ShopDomainError::Empty`] when nothing is left after trimming.
    pub fn parse(domain: &str) -> Result<Self, ShopDomainError> {
        let domain = domain.trim();

        if domain.is_empty() {
            return Err(ShopDomainError::Empty);
        }

        Ok(Self(domain.to_string()))
    }

    /// Domain as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShopDomain {
    type Error = ShopDomainError;

    fn try_from(domain: String) -> Result<Self, Self::Error> {
        Self::parse(&domain)
    }
}

impl From<ShopDomain> for String {
    fn from(domain: ShopDomain) -> Self {
        domain.0
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_trims_whitespace() -> TestResult {
        let domain = ShopDomain::parse("  demo.myshopify.com ")?;

        assert_eq!(domain.as_str(), "demo.myshopify.com");

        Ok(())
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(ShopDomain::parse(""), Err(ShopDomainError::Empty));
        assert_eq!(ShopDomain::parse(" \t"), Err(ShopDomainError::Empty));
    }
}
