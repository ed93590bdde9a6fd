//! Key-value store contract for the transient OAuth state and credential entries.
//!
//! Two entries exist per identity: the pending authorization state and the credential
//! payload handed off after the callback. Both are plain strings with an optional lifetime;
//! backends must stop returning an entry once its lifetime elapses.

pub mod memory;
#[cfg(feature = "redis")] pub mod redis;

pub use memory::MemoryStore;
#[cfg(feature = "redis")] pub use redis::RedisStore;

// self
use crate::{
	_prelude::*,
	auth::{OrgId, UserId},
};

/// Boxed future returned by [`KeyValueStore`] calls.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for short-lived string entries.
pub trait KeyValueStore
where
	Self: Send + Sync,
{
	/// Stores `value` under `key`, replacing any previous entry. `None` keeps it indefinitely.
	fn set<'a>(&'a self, key: &'a str, value: String, ttl: Option<Duration>) -> StoreFuture<'a, ()>;

	/// Returns the live entry under `key`, if any.
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Removes the entry under `key`; missing keys are not an error.
	fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`KeyValueStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Namespaced key for one identity's entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);
impl StoreKey {
	/// `state:{org}:{user}`: pending authorization state.
	pub fn state(org: &OrgId, user: &UserId) -> Self {
		Self(format!("state:{org}:{user}"))
	}

	/// `credentials:{org}:{user}`: token payload awaiting pickup.
	pub fn credentials(org: &OrgId, user: &UserId) -> Self {
		Self(format!("credentials:{org}:{user}"))
	}

	/// Borrows the rendered key.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for StoreKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for StoreKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_integration_error_with_source() {
		let store_error = StoreError::Backend { message: "database unreachable".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Storage(_)));
		assert!(error.to_string().contains("database unreachable"));

		let source = StdError::source(&error)
			.expect("Integration error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn keys_are_namespaced_per_identity() {
		let org = OrgId::new("org-1").expect("Org fixture should be valid.");
		let user = UserId::new("user-1").expect("User fixture should be valid.");

		assert_eq!(StoreKey::state(&org, &user).as_str(), "state:org-1:user-1");
		assert_eq!(StoreKey::credentials(&org, &user).to_string(), "credentials:org-1:user-1");
		assert_ne!(StoreKey::state(&org, &user), StoreKey::credentials(&org, &user));
	}
}
