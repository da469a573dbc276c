//! Extension traits

mod depot;
mod result;
mod shop;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use shop::ShopDepotExt as _;
