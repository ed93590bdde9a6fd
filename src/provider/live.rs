//! Reqwest-backed provider client.

// self
use crate::{
	_prelude::*,
	http::{self, ReqwestHttpClient},
	provider::{
		AuthorizeRequest, CallError, ClientMode, ListObjectsRequest, ObjectPage, ProviderClient,
		ProviderFuture, RawTokenResponse, TokenExchangeRequest, standard_authorize_url,
	},
};

/// Provider client that calls the descriptor's endpoints over HTTP.
#[derive(Clone, Debug)]
pub struct LiveProviderClient {
	http: ReqwestHttpClient,
}
impl LiveProviderClient {
	/// Wraps a configured transport.
	pub fn new(http: ReqwestHttpClient) -> Self {
		Self { http }
	}

	/// Builds a client over a fresh transport that never follows redirects.
	pub fn build() -> Result<Self> {
		Ok(Self::new(ReqwestHttpClient::new()?))
	}

	/// Borrows the underlying transport.
	pub fn http(&self) -> &ReqwestHttpClient {
		&self.http
	}
}
impl ProviderClient for LiveProviderClient {
	fn mode(&self) -> ClientMode {
		ClientMode::Live
	}

	fn authorize_url(&self, request: &AuthorizeRequest<'_>) -> Url {
		standard_authorize_url(request)
	}

	fn exchange_token<'a>(
		&'a self,
		request: TokenExchangeRequest<'a>,
	) -> ProviderFuture<'a, RawTokenResponse> {
		Box::pin(async move {
			let form = [
				("grant_type", "authorization_code"),
				("client_id", request.client_id),
				("client_secret", request.client_secret.expose()),
				("redirect_uri", request.redirect_uri.as_str()),
				("code", request.code),
			];
			let response = self
				.http
				.post(request.descriptor.endpoints.token.clone())
				.form(&form)
				.send()
				.await?;
			let response = http::read_response(response).await?;

			if !response.is_ok() {
				return Err(CallError::Status { status: response.status, body: response.body });
			}
			if let Err(e) = serde_json::from_str::<serde_json::Value>(&response.body) {
				return Err(CallError::Decode {
					status: response.status,
					body: response.body,
					reason: e.to_string(),
				});
			}

			Ok(RawTokenResponse::new(response.body))
		})
	}

	fn list_objects<'a>(&'a self, request: ListObjectsRequest<'a>) -> ProviderFuture<'a, ObjectPage> {
		Box::pin(async move {
			let response = self
				.http
				.get(request.descriptor.object_list_url(request.kind))
				.bearer_auth(request.access_token.expose())
				.query(&[("limit", request.limit)])
				.send()
				.await?;
			let response = http::read_response(response).await?;

			if !response.is_ok() {
				return Err(CallError::Status { status: response.status, body: response.body });
			}

			let de = &mut serde_json::Deserializer::from_str(&response.body);

			serde_path_to_error::deserialize(de).map_err(|e| CallError::Decode {
				status: response.status,
				reason: e.to_string(),
				body: response.body.clone(),
			})
		})
	}
}
