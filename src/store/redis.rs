//! Redis-backed [`KeyValueStore`] for deployments that share state across processes.

// crates.io
use redis::{AsyncCommands, Client, RedisError};
// self
use crate::{
	_prelude::*,
	store::{KeyValueStore, StoreError, StoreFuture},
};

/// Store that keeps entries in Redis, relying on `SET ... EX` for lifetimes.
#[derive(Clone, Debug)]
pub struct RedisStore {
	client: Client,
}
impl RedisStore {
	/// Opens a client for `url` (`redis://host:port/db`); no connection is made yet.
	pub fn open(url: &str) -> Result<Self, StoreError> {
		Ok(Self { client: Client::open(url).map_err(backend)? })
	}

	/// Wraps an existing client.
	pub fn with_client(client: Client) -> Self {
		Self { client }
	}
}
impl KeyValueStore for RedisStore {
	fn set<'a>(&'a self, key: &'a str, value: String, ttl: Option<Duration>) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;
			let _: () = match ttl {
				Some(ttl) => conn.set_ex(key, value, expiry_secs(ttl)).await,
				None => conn.set(key, value).await,
			}
			.map_err(backend)?;

			Ok(())
		})
	}

	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move {
			let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;
			let value: Option<String> = conn.get(key).await.map_err(backend)?;

			Ok(value)
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let mut conn = self.client.get_multiplexed_async_connection().await.map_err(backend)?;
			let _: () = conn.del(key).await.map_err(backend)?;

			Ok(())
		})
	}
}

/// Redis rejects a zero expiry; the shortest honored lifetime is one second.
fn expiry_secs(ttl: Duration) -> u64 {
	u64::try_from(ttl.whole_seconds()).unwrap_or_default().max(1)
}

fn backend(e: RedisError) -> StoreError {
	StoreError::Backend { message: e.to_string() }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn expiry_rounds_down_to_whole_seconds_with_a_floor_of_one() {
		assert_eq!(expiry_secs(Duration::seconds(600)), 600);
		assert_eq!(expiry_secs(Duration::milliseconds(2_900)), 2);
		assert_eq!(expiry_secs(Duration::milliseconds(300)), 1);
		assert_eq!(expiry_secs(Duration::ZERO), 1);
		assert_eq!(expiry_secs(Duration::seconds(-5)), 1);
	}

	#[test]
	fn open_rejects_malformed_urls() {
		assert!(matches!(RedisStore::open("not a url"), Err(StoreError::Backend { .. })));
		assert!(RedisStore::open("redis://127.0.0.1:6379/0").is_ok());
	}
}
