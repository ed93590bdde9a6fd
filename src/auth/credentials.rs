//! Provider credential payload handed from the callback to the catalog fetch.
//!
//! The token endpoint response is stored verbatim; [`CredentialBlob`] is the typed view the
//! rest of the crate reads. Unknown provider fields (`hub_id`, `scopes`, ...) are preserved
//! in [`CredentialBlob::extra`] so re-serializing never drops data.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token issued by the fixture client; recognized by the catalog fetch.
pub const MOCK_ACCESS_TOKEN: &str = "mock_access_token";
/// Refresh token issued by the fixture client.
pub const MOCK_REFRESH_TOKEN: &str = "mock_refresh_token";
/// Lifetime advertised by the fixture token payload.
pub const MOCK_EXPIRES_IN: u64 = 3_600;

/// Parsed token payload returned by the provider's token endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CredentialBlob {
	/// Bearer token used for API calls.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<TokenSecret>,
	/// Refresh token; kept for callers even though this crate never refreshes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Access token lifetime in seconds, as reported by the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
	/// Token type (`bearer`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Remaining provider fields.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl CredentialBlob {
	/// Parses a stored or caller-supplied JSON payload.
	pub fn from_json(raw: &str) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(de)
			.map_err(|source| Error::InvalidCredentialsData { source })
	}

	/// Fixed payload synthesized for mock callbacks.
	pub fn mock() -> Self {
		Self {
			access_token: Some(TokenSecret::new(MOCK_ACCESS_TOKEN)),
			refresh_token: Some(TokenSecret::new(MOCK_REFRESH_TOKEN)),
			expires_in: Some(MOCK_EXPIRES_IN),
			token_type: Some("bearer".into()),
			extra: Map::new(),
		}
	}

	/// Returns the access token, rejecting absent or empty values.
	pub fn access_token(&self) -> Result<&TokenSecret> {
		self.access_token.as_ref().filter(|token| !token.is_empty()).ok_or(Error::NoAccessToken)
	}

	/// Returns true when the payload was issued by the fixture client.
	pub fn is_mock(&self) -> bool {
		self.access_token.as_ref().is_some_and(|token| token.expose() == MOCK_ACCESS_TOKEN)
	}

	/// Access token lifetime as a [`Duration`], when the provider supplied one.
	pub fn expiry_hint(&self) -> Option<Duration> {
		self.expires_in.and_then(|secs| i64::try_from(secs).ok()).map(Duration::seconds)
	}
}
impl FromStr for CredentialBlob {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_json(s)
	}
}
