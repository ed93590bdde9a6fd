//! HubSpot OAuth 2.0 integration: CSRF-safe state round-trips through a short-lived key-value
//! store, single-use credential hand-off, and a catalog mapper that turns CRM contacts,
//! companies, and deals into platform-neutral integration items.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flows;
#[cfg(feature = "reqwest")] pub mod http;
pub mod obs;
pub mod provider;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{ProviderId, ScopeSet},
		config::IntegrationConfig,
		flows::Integration,
		http::ReqwestHttpClient,
		provider::{FixtureProviderClient, LiveProviderClient, ProviderDescriptor},
		store::{KeyValueStore, MemoryStore},
	};

	/// Client identifier used by test configurations.
	pub const TEST_CLIENT_ID: &str = "client-it";
	/// Client secret used by test configurations.
	pub const TEST_CLIENT_SECRET: &str = "secret-it";
	/// Redirect URI used by test configurations.
	pub const TEST_REDIRECT_URI: &str = "http://localhost:8000/integrations/hubspot/oauth2callback";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Integration configuration shared by tests.
	pub fn test_config() -> IntegrationConfig {
		IntegrationConfig::new(
			TEST_CLIENT_ID,
			TEST_CLIENT_SECRET,
			Url::parse(TEST_REDIRECT_URI).expect("Test redirect URI should parse successfully."),
		)
	}

	/// Descriptor whose token and object-list endpoints point at a mock server.
	pub fn mock_descriptor(base_url: &str) -> ProviderDescriptor {
		let base = Url::parse(base_url).expect("Mock server base URL should parse successfully.");

		ProviderDescriptor::builder(
			ProviderId::new("hubspot-mock").expect("Mock provider identifier should be valid."),
		)
		.authorization_endpoint(
			base.join("/oauth/authorize").expect("Mock authorization endpoint should join."),
		)
		.token_endpoint(base.join("/oauth/v1/token").expect("Mock token endpoint should join."))
		.api_base(base.clone())
		.app_base(Url::parse("https://app.hubspot.com").expect("App base URL should parse."))
		.scope(
			ScopeSet::new(["oauth", "crm.objects.contacts.read"])
				.expect("Mock scope set should be valid."),
		)
		.build()
		.expect("Mock provider descriptor should build successfully.")
	}

	/// Constructs an [`Integration`] backed by an in-memory store and the live reqwest client
	/// used across integration tests.
	pub fn build_reqwest_test_integration(
		descriptor: ProviderDescriptor,
	) -> (Integration, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn KeyValueStore> = store_backend.clone();
		let client = Arc::new(LiveProviderClient::new(test_reqwest_http_client()));
		let integration = Integration::new(test_config(), descriptor, store, client);

		(integration, store_backend)
	}

	/// Constructs an [`Integration`] that never leaves the process.
	pub fn build_fixture_test_integration() -> (Integration, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn KeyValueStore> = store_backend.clone();
		let integration = Integration::new(
			test_config(),
			ProviderDescriptor::hubspot().expect("HubSpot descriptor should build."),
			store,
			Arc::new(FixtureProviderClient),
		);

		(integration, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
