//! Normalized catalog of CRM objects.
//!
//! `item` defines the platform-neutral [`IntegrationItem`] and the object kinds fetched from
//! the provider, `mapper` turns one raw CRM record into an item, and `outcome` reduces the
//! per-kind fetch results into an [`ItemCatalog`] that reports which kinds failed.

pub mod item;
pub mod mapper;
pub mod outcome;

pub use item::*;
pub use mapper::*;
pub use outcome::*;
