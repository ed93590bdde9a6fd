//! In-process provider used for demos and the mock authorization path.

// crates.io
use serde_json::{Value, json};
// self
use crate::{
	_prelude::*,
	auth::CredentialBlob,
	catalog::ObjectKind,
	provider::{
		AuthorizeRequest, CallError, ClientMode, ListObjectsRequest, ObjectPage, ProviderClient,
		ProviderFuture, RawTokenResponse, TokenExchangeRequest,
	},
};

/// Authorization code the fixture redirect carries.
pub const MOCK_CODE: &str = "mock_code";

/// Provider client that answers every call from canned data.
///
/// The consent URL points straight back at the redirect URI with [`MOCK_CODE`], the exchange
/// yields [`CredentialBlob::mock`], and each object kind lists a small fixed set of records.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixtureProviderClient;
impl FixtureProviderClient {
	fn records(kind: ObjectKind) -> Vec<Value> {
		let now = OffsetDateTime::now_utc();
		let now_ms = (now.unix_timestamp_nanos() / 1_000_000).to_string();
		let record = |id: &str, properties: Value| {
			json!({ "id": id, "properties": properties, "createdAt": now_ms, "updatedAt": now_ms })
		};

		match kind {
			ObjectKind::Contacts => vec![
				record("1001", json!({ "firstname": "John", "lastname": "Doe" })),
				record("1002", json!({ "firstname": "Jane", "lastname": "Smith" })),
			],
			ObjectKind::Companies => vec![record("2001", json!({ "name": "Acme Corporation" }))],
			ObjectKind::Deals => vec![record("3001", json!({ "dealname": "Enterprise Deal Q1" }))],
		}
	}
}
impl ProviderClient for FixtureProviderClient {
	fn mode(&self) -> ClientMode {
		ClientMode::Fixture
	}

	fn authorize_url(&self, request: &AuthorizeRequest<'_>) -> Url {
		let mut url = request.redirect_uri.clone();

		url.query_pairs_mut().append_pair("code", MOCK_CODE).append_pair("state", request.state);

		url
	}

	fn exchange_token<'a>(
		&'a self,
		_request: TokenExchangeRequest<'a>,
	) -> ProviderFuture<'a, RawTokenResponse> {
		Box::pin(async move {
			let body = serde_json::to_string(&CredentialBlob::mock()).map_err(|e| {
				CallError::Decode { status: 200, body: String::new(), reason: e.to_string() }
			})?;

			Ok(RawTokenResponse::new(body))
		})
	}

	fn list_objects<'a>(&'a self, request: ListObjectsRequest<'a>) -> ProviderFuture<'a, ObjectPage> {
		Box::pin(async move {
			Ok(ObjectPage { results: Self::records(request.kind) })
		})
	}
}
