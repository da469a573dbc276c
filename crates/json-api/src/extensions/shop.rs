//! Authenticated shop stored in the depot.

use salvo::prelude::{Depot, StatusError};

use countdown::shops::ShopDomain;

const SHOP_DOMAIN_DEPOT_KEY: &str = "shop_domain";

pub(crate) trait ShopDepotExt {
    fn insert_shop_domain(&mut self, shop: ShopDomain);

    /// The shop resolved by the auth middleware.
    fn shop_domain_or_401(&self) -> Result<ShopDomain, StatusError>;
}

impl ShopDepotExt for Depot {
    fn insert_shop_domain(&mut self, shop: ShopDomain) {
        self.insert(SHOP_DOMAIN_DEPOT_KEY, shop);
    }

    fn shop_domain_or_401(&self) -> Result<ShopDomain, StatusError> {
        self.get::<ShopDomain>(SHOP_DOMAIN_DEPOT_KEY)
            .cloned()
            .map_err(|_missing| StatusError::unauthorized())
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_shop_is_unauthorized() {
        let depot = Depot::new();

        assert_eq!(
            depot.shop_domain_or_401().map_err(|error| error.code),
            Err(StatusCode::UNAUTHORIZED)
        );
    }

    #[test]
    fn inserted_shop_is_returned() -> TestResult {
        let mut depot = Depot::new();
        let shop = ShopDomain::parse("demo.myshopify.com")?;

        depot.insert_shop_domain(shop.clone());

        assert_eq!(depot.shop_domain_or_401().ok(), Some(shop));

        Ok(())
    }
}
