//! Client registration settings resolved once at startup and injected into [`Integration`].
//!
//! [`Integration`]: crate::flows::Integration

// std
use std::env;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Environment variable holding the OAuth client identifier.
pub const ENV_CLIENT_ID: &str = "HUBSPOT_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const ENV_CLIENT_SECRET: &str = "HUBSPOT_CLIENT_SECRET";
/// Environment variable overriding the redirect URI.
pub const ENV_REDIRECT_URI: &str = "HUBSPOT_REDIRECT_URI";
/// Redirect URI used when [`ENV_REDIRECT_URI`] is unset.
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/integrations/hubspot/oauth2callback";

/// OAuth client registration plus lifetimes for the transient store entries.
#[derive(Clone)]
pub struct IntegrationConfig {
	/// OAuth 2.0 client identifier registered with the provider.
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: TokenSecret,
	/// Redirect URI registered with the provider; must match exactly.
	pub redirect_uri: Url,
	/// Lifetime of the pending state entry.
	pub state_ttl: Duration,
	/// Lifetime of the stored credential payload.
	pub credentials_ttl: Duration,
	/// Records requested per object type (1..=100).
	pub page_size: u8,
}
impl IntegrationConfig {
	/// Default lifetime for both transient store entries.
	pub const DEFAULT_TTL: Duration = Duration::seconds(600);
	/// Largest page the object-list endpoints accept.
	pub const MAX_PAGE_SIZE: u8 = 100;

	/// Creates a configuration with the default lifetimes and page size.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		redirect_uri: Url,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			redirect_uri,
			state_ttl: Self::DEFAULT_TTL,
			credentials_ttl: Self::DEFAULT_TTL,
			page_size: Self::MAX_PAGE_SIZE,
		}
	}

	/// Resolves the configuration from `HUBSPOT_*` environment variables.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| env::var(name).ok())
	}

	/// Resolves the configuration through an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let required = |name: &'static str| {
			lookup(name).filter(|value| !value.is_empty()).ok_or(ConfigError::MissingEnv { name })
		};
		let client_id = required(ENV_CLIENT_ID)?;
		let client_secret = required(ENV_CLIENT_SECRET)?;
		let redirect_raw = lookup(ENV_REDIRECT_URI)
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| DEFAULT_REDIRECT_URI.into());
		let redirect_uri = Url::parse(&redirect_raw)
			.map_err(|source| ConfigError::InvalidUrl { field: "redirect", source })?;

		Ok(Self::new(client_id, client_secret, redirect_uri))
	}

	/// Overrides the pending state lifetime; negative values clamp to zero.
	pub fn with_state_ttl(mut self, ttl: Duration) -> Self {
		self.state_ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };

		self
	}

	/// Overrides the credential payload lifetime; negative values clamp to zero.
	pub fn with_credentials_ttl(mut self, ttl: Duration) -> Self {
		self.credentials_ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };

		self
	}

	/// Overrides the page size, clamped to `1..=100`.
	pub fn with_page_size(mut self, page_size: u8) -> Self {
		self.page_size = page_size.clamp(1, Self::MAX_PAGE_SIZE);

		self
	}
}
impl Debug for IntegrationConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IntegrationConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("redirect_uri", &self.redirect_uri.as_str())
			.field("state_ttl", &self.state_ttl)
			.field("credentials_ttl", &self.credentials_ttl)
			.field("page_size", &self.page_size)
			.finish()
	}
}
