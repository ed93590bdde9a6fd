//! Auth-domain identifiers, scope sets, secrets, and the provider credential payload.

pub mod credentials;
pub mod id;
pub mod scope;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use scope::*;
pub use secret::*;
