//! High-level flow orchestrators for the HubSpot integration.
//!
//! [`Integration`] ties the configuration, provider descriptor, provider client, and
//! key-value store together; each submodule adds one operation to it:
//! [`Integration::begin_authorization`], [`Integration::handle_callback`],
//! [`Integration::fetch_credentials`], and [`Integration::fetch_all_items`].

pub mod authorize;
pub mod callback;
pub mod catalog;
pub mod common;
pub mod credentials;
pub mod state;

pub use callback::*;
pub use state::*;

// self
use crate::{
	_prelude::*,
	config::IntegrationConfig,
	provider::{ClientMode, FixtureProviderClient, ProviderClient, ProviderDescriptor},
	store::{KeyValueStore, StoreKey},
};
#[cfg(feature = "reqwest")] use crate::provider::LiveProviderClient;

/// Coordinates the OAuth round-trip and catalog fetch against a single provider descriptor.
///
/// The integration owns the store, provider client, and descriptor references so individual
/// flows can focus on their own protocol step. Operations touching the same identity's store
/// entries are serialized by a per-key guard so a pending state or credential payload is
/// consumed at most once, even across concurrent callers sharing this value.
#[derive(Clone)]
pub struct Integration {
	/// Key-value store holding pending states and credential payloads.
	pub store: Arc<dyn KeyValueStore>,
	/// Provider descriptor that defines endpoints and scopes.
	pub descriptor: ProviderDescriptor,
	/// Client used for consent URLs, code exchanges, and object listing.
	pub client: Arc<dyn ProviderClient>,
	/// Client registration and entry lifetimes.
	pub config: IntegrationConfig,
	flow_guards: Arc<Mutex<HashMap<StoreKey, Arc<AsyncMutex<()>>>>>,
}
impl Integration {
	/// Creates an integration around caller-provided collaborators.
	pub fn new(
		config: IntegrationConfig,
		descriptor: ProviderDescriptor,
		store: Arc<dyn KeyValueStore>,
		client: Arc<dyn ProviderClient>,
	) -> Self {
		Self { store, descriptor, client, config, flow_guards: Default::default() }
	}

	/// Creates an integration that talks to production HubSpot over reqwest.
	#[cfg(feature = "reqwest")]
	pub fn live(config: IntegrationConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
		let client = LiveProviderClient::build()?;

		Ok(Self::new(config, ProviderDescriptor::hubspot()?, store, Arc::new(client)))
	}

	/// Creates an integration whose provider calls never leave the process.
	pub fn fixture(config: IntegrationConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
		Ok(Self::new(config, ProviderDescriptor::hubspot()?, store, Arc::new(FixtureProviderClient)))
	}

	/// Replaces the provider client.
	pub fn with_client(mut self, client: Arc<dyn ProviderClient>) -> Self {
		self.client = client;

		self
	}

	/// Mode of the configured provider client.
	pub fn mode(&self) -> ClientMode {
		self.client.mode()
	}
}
impl Debug for Integration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Integration")
			.field("descriptor", &self.descriptor)
			.field("config", &self.config)
			.field("mode", &self.mode())
			.finish()
	}
}
