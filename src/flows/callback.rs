//! Authorization redirect handling: state validation, code exchange, credential hand-off.
//!
//! The handler walks `AwaitingCode → Validating → ExchangingToken → Stored`. Validation
//! failures leave the store untouched; once the state validates it is deleted before the
//! exchange runs, so a failed exchange still burns the state and the flow must restart.

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{OrgId, UserId},
	error::StateError,
	flows::{Integration, PendingState, common},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{FixtureProviderClient, MOCK_CODE, ProviderClient, TokenExchangeRequest},
	store::StoreKey,
};

const CLOSE_WINDOW_HTML: &str = "<html>\n\t<script>\n\t\twindow.close();\n\t</script>\n</html>\n";
const UNKNOWN_ERROR: &str = "Unknown error";

/// Query parameters delivered to the redirect URI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
	/// Authorization code.
	#[serde(default)]
	pub code: Option<String>,
	/// Encoded state issued by [`Integration::begin_authorization`].
	#[serde(default)]
	pub state: Option<String>,
	/// Provider error code (for example `access_denied`).
	#[serde(default)]
	pub error: Option<String>,
	/// Human-readable provider error.
	#[serde(default)]
	pub error_description: Option<String>,
}
impl CallbackParams {
	/// Parameters for a successful redirect.
	pub fn new(code: impl Into<String>, state: impl Into<String>) -> Self {
		Self { code: Some(code.into()), state: Some(state.into()), ..Default::default() }
	}

	/// Parses a raw query string (without the leading `?`). Unknown keys are ignored and the
	/// first occurrence of a repeated key wins.
	pub fn from_query(query: &str) -> Self {
		let mut params = Self::default();

		for (key, value) in form_urlencoded::parse(query.as_bytes()) {
			let slot = match &*key {
				"code" => &mut params.code,
				"state" => &mut params.state,
				"error" => &mut params.error,
				"error_description" => &mut params.error_description,
				_ => continue,
			};

			if slot.is_none() {
				*slot = Some(value.into_owned());
			}
		}

		params
	}

	/// Parses the query component of a full redirect URL.
	pub fn from_url(url: &Url) -> Self {
		Self::from_query(url.query().unwrap_or_default())
	}

	fn non_empty(value: &Option<String>) -> Option<&str> {
		value.as_deref().filter(|value| !value.is_empty())
	}
}

/// Acknowledgement returned once credentials are stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackAck {
	/// User that completed the authorization.
	pub user_id: UserId,
	/// Organization that completed the authorization.
	pub org_id: OrgId,
	/// True when the credentials came from the fixture client.
	pub mock: bool,
}
impl CallbackAck {
	/// HTML document that closes the popup window which hosted the consent page.
	pub fn html(&self) -> &'static str {
		CLOSE_WINDOW_HTML
	}
}

impl Integration {
	/// Validates the redirect, exchanges the code, and stores the token response for pickup
	/// via [`Integration::fetch_credentials`].
	pub async fn handle_callback(&self, params: &CallbackParams) -> Result<CallbackAck> {
		const KIND: FlowKind = FlowKind::Callback;

		let span = FlowSpan::new(KIND, "handle_callback");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.handle_callback_inner(params)).await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn handle_callback_inner(&self, params: &CallbackParams) -> Result<CallbackAck> {
		if let Some(error) = CallbackParams::non_empty(&params.error) {
			return Err(Error::ProviderAuth {
				error: error.to_owned(),
				description: CallbackParams::non_empty(&params.error_description)
					.unwrap_or(UNKNOWN_ERROR)
					.to_owned(),
			});
		}

		let code = CallbackParams::non_empty(&params.code)
			.ok_or(Error::MissingParameter { parameter: "code" })?;
		let encoded = CallbackParams::non_empty(&params.state)
			.ok_or(Error::MissingParameter { parameter: "state" })?;
		let state = PendingState::decode(encoded)?;

		self.consume_state(&state).await?;

		let mock = state.mock || code == MOCK_CODE;
		let client: &dyn ProviderClient =
			if mock { &FixtureProviderClient } else { self.client.as_ref() };
		let response = client
			.exchange_token(TokenExchangeRequest {
				descriptor: &self.descriptor,
				client_id: &self.config.client_id,
				client_secret: &self.config.client_secret,
				redirect_uri: &self.config.redirect_uri,
				code,
			})
			.await
			.map_err(|e| e.into_exchange_error())?;
		let key = StoreKey::credentials(&state.org_id, &state.user_id);

		self.store
			.set(key.as_str(), response.into_inner(), Some(self.config.credentials_ttl))
			.await
			.map_err(Error::from)?;

		Ok(CallbackAck { user_id: state.user_id, org_id: state.org_id, mock })
	}

	/// Loads, verifies, and deletes the stored state under the identity's guard.
	async fn consume_state(&self, state: &PendingState) -> Result<()> {
		let key = StoreKey::state(&state.org_id, &state.user_id);
		let guard = common::flow_guard(self, &key);
		let result = {
			let _held = guard.lock().await;

			self.verify_and_delete(&key, state).await
		};

		common::release_guard(self, &key, guard);

		result
	}

	async fn verify_and_delete(&self, key: &StoreKey, state: &PendingState) -> Result<()> {
		let saved = self
			.store
			.get(key.as_str())
			.await
			.map_err(Error::from)?
			.ok_or(StateError::ExpiredOrNotFound)?;

		state.verify_against(&saved)?;
		self.store.delete(key.as_str()).await.map_err(Error::from)?;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_parsing_decodes_and_keeps_first_value() {
		let params = CallbackParams::from_query(
			"code=abc&state=x%2By&state=ignored&extra=1&error_description=a+b",
		);

		assert_eq!(params.code.as_deref(), Some("abc"));
		assert_eq!(params.state.as_deref(), Some("x+y"));
		assert_eq!(params.error, None);
		assert_eq!(params.error_description.as_deref(), Some("a b"));
	}

	#[test]
	fn url_parsing_reads_the_query_component() {
		let url = Url::parse("http://localhost:8000/cb?code=mock_code&state=s")
			.expect("Callback URL fixture should parse.");

		assert_eq!(CallbackParams::from_url(&url), CallbackParams::new("mock_code", "s"));
		assert_eq!(
			CallbackParams::from_url(
				&Url::parse("http://localhost:8000/cb").expect("Bare URL fixture should parse.")
			),
			CallbackParams::default()
		);
	}

	#[test]
	fn ack_html_closes_the_window() {
		let ack = CallbackAck {
			user_id: UserId::new("u").expect("User fixture should be valid."),
			org_id: OrgId::new("o").expect("Org fixture should be valid."),
			mock: true,
		};

		assert!(ack.html().contains("window.close();"));
		assert!(ack.html().starts_with("<html>"));
	}
}
