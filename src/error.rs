//! Integration-level error types shared across flows, providers, and stores.

// self
use crate::_prelude::*;

/// Integration-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical integration error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeouts).
	#[error(transparent)]
	Network(#[from] TransportError),
	/// Caller-supplied identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] crate::auth::IdentifierError),
	/// OAuth state failed decoding or validation.
	#[error(transparent)]
	InvalidState(#[from] StateError),

	/// Provider reported an error on the authorization redirect (e.g., consent denied).
	#[error("OAuth error: {description}.")]
	ProviderAuth {
		/// Provider `error` code.
		error: String,
		/// Provider `error_description`, or a generic placeholder.
		description: String,
	},
	/// Callback request omitted a required query parameter.
	#[error("Missing `{parameter}` parameter.")]
	MissingParameter {
		/// Name of the first missing parameter.
		parameter: &'static str,
	},
	/// No credentials are stored for the identity, or they already expired.
	#[error("No HubSpot credentials found. Please re-authenticate.")]
	CredentialsNotFound,
	/// Stored credentials are not a valid token payload.
	#[error("Invalid credentials data.")]
	InvalidCredentialsData {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint answered with a non-success status or an unreadable body.
	#[error("Token exchange failed: {status} - {body}.")]
	TokenExchangeFailed {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Provider rejected the access token (expired or revoked).
	#[error("HubSpot access token expired or invalid.")]
	UpstreamUnauthorized,
	/// Credentials do not carry an access token.
	#[error("No access token found in credentials.")]
	NoAccessToken,
}
impl Error {
	/// HTTP status a web layer should answer with when surfacing this error.
	pub fn http_status(&self) -> u16 {
		match self {
			Self::Storage(_) | Self::Config(_) | Self::Network(_) => 500,
			Self::UpstreamUnauthorized => 401,
			Self::Identifier(_)
			| Self::InvalidState(_)
			| Self::ProviderAuth { .. }
			| Self::MissingParameter { .. }
			| Self::CredentialsNotFound
			| Self::InvalidCredentialsData { .. }
			| Self::TokenExchangeFailed { .. }
			| Self::NoAccessToken => 400,
		}
	}
}

/// OAuth state failures raised while decoding or validating the callback `state`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StateError {
	/// The `state` parameter could not be decoded.
	#[error("Invalid state parameter: {reason}.")]
	Malformed {
		/// Decoder-supplied reason string.
		reason: String,
	},
	/// The decoded state lacks the token or identity fields.
	#[error("Invalid state data.")]
	IncompleteData,
	/// No pending state is stored for the identity (never issued, consumed, or expired).
	#[error("State expired or not found.")]
	ExpiredOrNotFound,
	/// The stored pending state could not be parsed.
	#[error("Invalid saved state.")]
	InvalidSaved,
	/// The returned token differs from the stored one.
	#[error("State does not match.")]
	Mismatch,
}

/// Configuration and validation failures raised by the integration.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured URL cannot be parsed.
	#[error("The {field} URL is invalid.")]
	InvalidUrl {
		/// Which setting carried the URL.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A required environment variable is absent.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, timeouts).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling HubSpot.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete before the client deadline.
	#[error("Request to HubSpot timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}
