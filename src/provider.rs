//! Provider-facing descriptors (data) and clients (behavior).
//!
//! `descriptor` exposes validated HubSpot metadata (`ProviderDescriptor`): HTTPS endpoints for
//! consent, token exchange, the CRM API, and the web app used for deep links, plus the
//! requested scope set. `client` defines [`ProviderClient`], the capability flows call to
//! build consent URLs, exchange codes, and list CRM objects. Two variants ship with the
//! crate: [`LiveProviderClient`] over reqwest and [`FixtureProviderClient`], which never
//! leaves the process.

pub mod client;
pub mod descriptor;
pub mod fixture;
#[cfg(feature = "reqwest")] pub mod live;

pub use client::*;
pub use descriptor::*;
pub use fixture::*;
#[cfg(feature = "reqwest")] pub use live::*;
