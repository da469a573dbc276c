//! Timer Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod proxy;
pub(crate) mod update;
