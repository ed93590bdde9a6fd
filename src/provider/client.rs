//! Provider client capability consumed by the flows.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	catalog::ObjectKind,
	error::{ConfigError, TransportError},
	provider::ProviderDescriptor,
};

/// Boxed future returned by [`ProviderClient`] calls.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CallError>> + 'a + Send>>;

/// Whether a client talks to the provider or synthesizes responses locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientMode {
	/// Real HTTP calls against the descriptor's endpoints.
	Live,
	/// Canned responses; nothing leaves the process.
	Fixture,
}

/// Inputs for building the consent URL.
#[derive(Clone, Copy, Debug)]
pub struct AuthorizeRequest<'a> {
	/// Provider metadata.
	pub descriptor: &'a ProviderDescriptor,
	/// OAuth client identifier.
	pub client_id: &'a str,
	/// Registered redirect URI.
	pub redirect_uri: &'a Url,
	/// Encoded state parameter.
	pub state: &'a str,
}

/// Inputs for the authorization-code exchange.
#[derive(Clone, Copy, Debug)]
pub struct TokenExchangeRequest<'a> {
	/// Provider metadata.
	pub descriptor: &'a ProviderDescriptor,
	/// OAuth client identifier.
	pub client_id: &'a str,
	/// OAuth client secret.
	pub client_secret: &'a TokenSecret,
	/// Registered redirect URI; must match the one used for consent.
	pub redirect_uri: &'a Url,
	/// Authorization code returned on the callback.
	pub code: &'a str,
}

/// Inputs for listing one CRM object kind.
#[derive(Clone, Copy, Debug)]
pub struct ListObjectsRequest<'a> {
	/// Provider metadata.
	pub descriptor: &'a ProviderDescriptor,
	/// Kind to list.
	pub kind: ObjectKind,
	/// Bearer token.
	pub access_token: &'a TokenSecret,
	/// Page size.
	pub limit: u8,
}

/// Token endpoint response body, kept verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct RawTokenResponse(String);
impl RawTokenResponse {
	/// Wraps a response body that is known to be JSON.
	pub fn new(body: impl Into<String>) -> Self {
		Self(body.into())
	}

	/// Borrows the body.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the owned body.
	pub fn into_inner(self) -> String {
		self.0
	}
}
impl Debug for RawTokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RawTokenResponse(<redacted>)")
	}
}

/// One page of raw records returned by an object-list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ObjectPage {
	/// Raw records, in provider order.
	#[serde(default)]
	pub results: Vec<Value>,
}

/// Failure of a single provider call.
#[derive(Debug, ThisError)]
pub enum CallError {
	/// Provider answered with an unexpected status.
	#[error("HubSpot responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Request never produced a response.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error("HubSpot response could not be decoded: {reason}.")]
	Decode {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
		/// Decoder-supplied reason.
		reason: String,
	},
	/// Request could not be built locally.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl CallError {
	/// HTTP status attached to the failure, if a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } | Self::Decode { status, .. } => Some(*status),
			Self::Transport(_) | Self::Config(_) => None,
		}
	}

	/// Returns true when the provider rejected the bearer token.
	pub fn is_unauthorized(&self) -> bool {
		self.status() == Some(401)
	}

	/// Maps a failed code exchange into the integration error surface.
	pub(crate) fn into_exchange_error(self) -> Error {
		match self {
			Self::Status { status, body } | Self::Decode { status, body, .. } =>
				Error::TokenExchangeFailed { status, body },
			Self::Transport(e) => Error::Network(e),
			Self::Config(e) => Error::Config(e),
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for CallError {
	fn from(e: ReqwestError) -> Self {
		if e.is_builder() {
			Self::Config(e.into())
		} else {
			Self::Transport(e.into())
		}
	}
}

/// Provider capability: consent URLs, code exchange, and object listing.
pub trait ProviderClient
where
	Self: Send + Sync,
{
	/// Reports whether calls reach the provider.
	fn mode(&self) -> ClientMode;

	/// Builds the consent URL the user is redirected to.
	fn authorize_url(&self, request: &AuthorizeRequest<'_>) -> Url;

	/// Exchanges an authorization code for the provider's token response.
	fn exchange_token<'a>(
		&'a self,
		request: TokenExchangeRequest<'a>,
	) -> ProviderFuture<'a, RawTokenResponse>;

	/// Lists one page of records for a CRM object kind.
	fn list_objects<'a>(&'a self, request: ListObjectsRequest<'a>) -> ProviderFuture<'a, ObjectPage>;
}

/// Consent URL with `client_id`, `redirect_uri`, `scope` (when non-empty), and `state` appended
/// to the descriptor's authorization endpoint.
///
/// Spaces are percent-encoded as `%20` rather than the form-encoded `+`.
pub fn standard_authorize_url(request: &AuthorizeRequest<'_>) -> Url {
	let mut url = request.descriptor.endpoints.authorization.clone();

	{
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("client_id", request.client_id);
		pairs.append_pair("redirect_uri", request.redirect_uri.as_str());

		if !request.descriptor.scope.is_empty() {
			pairs.append_pair("scope", &request.descriptor.scope.normalized());
		}

		pairs.append_pair("state", request.state);
	}

	// Form encoding escapes a literal `+` as `%2B`, so every remaining `+` is a space.
	let query = url.query().map(|query| query.replace('+', "%20"));

	url.set_query(query.as_deref());

	url
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn authorize_url_carries_registration_and_state() {
		let descriptor =
			ProviderDescriptor::hubspot().expect("HubSpot descriptor should build.");
		let redirect = Url::parse("http://localhost:8000/cb").expect("Redirect fixture");
		let url = standard_authorize_url(&AuthorizeRequest {
			descriptor: &descriptor,
			client_id: "client",
			redirect_uri: &redirect,
			state: "abc",
		});
		let pairs = url.query_pairs().into_owned().collect::<HashMap<_, _>>();

		assert!(url.as_str().starts_with("https://app.hubspot.com/oauth/authorize?"));
		assert_eq!(pairs.get("client_id").map(String::as_str), Some("client"));
		assert_eq!(pairs.get("redirect_uri").map(String::as_str), Some("http://localhost:8000/cb"));
		assert_eq!(pairs.get("state").map(String::as_str), Some("abc"));
		assert_eq!(
			pairs.get("scope").map(String::as_str),
			Some(descriptor.scope.normalized().as_str())
		);
	}

	#[test]
	fn authorize_url_percent_encodes_spaces() {
		let descriptor =
			ProviderDescriptor::hubspot().expect("HubSpot descriptor should build.");
		let redirect = Url::parse("http://localhost:8000/cb").expect("Redirect fixture");
		let url = standard_authorize_url(&AuthorizeRequest {
			descriptor: &descriptor,
			client_id: "client",
			redirect_uri: &redirect,
			state: "a+b c",
		});
		let query = url.query().expect("Consent URL should carry a query.");

		assert!(!query.contains('+'));
		assert!(query.contains(
			"scope=crm.objects.companies.read%20crm.objects.contacts.read%20crm.objects.deals.read%20oauth"
		));
		assert!(query.ends_with("state=a%2Bb%20c"));

		let pairs = url.query_pairs().into_owned().collect::<HashMap<_, _>>();

		assert_eq!(pairs.get("state").map(String::as_str), Some("a+b c"));
	}

	#[test]
	fn unauthorized_is_status_based() {
		assert!(CallError::Status { status: 401, body: String::new() }.is_unauthorized());
		assert!(!CallError::Status { status: 403, body: String::new() }.is_unauthorized());
		assert!(
			!CallError::Transport(TransportError::network(std::io::Error::other("reset")))
				.is_unauthorized()
		);
	}

	#[test]
	fn exchange_errors_keep_status_and_body() {
		let err = CallError::Decode { status: 200, body: "<html>".into(), reason: "eof".into() }
			.into_exchange_error();

		assert!(matches!(err, Error::TokenExchangeFailed { status: 200, ref body } if body == "<html>"));
	}
}
