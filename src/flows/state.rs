//! Pending authorization state: the CSRF nonce plus the identity it was issued to.
//!
//! The callback receives the state as an opaque, URL-safe string (base64url of the JSON
//! document) while the store keeps the raw JSON. Validation decodes the returned string,
//! loads the stored copy for the identity it names, and compares the nonces in constant time.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use subtle::ConstantTimeEq;
// self
use crate::{
	_prelude::*,
	auth::{OrgId, UserId},
	error::StateError,
};

const TOKEN_BYTES: usize = 32;

/// State issued by [`Integration::begin_authorization`] and consumed by the callback.
///
/// [`Integration::begin_authorization`]: crate::flows::Integration::begin_authorization
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingState {
	/// Random CSRF nonce.
	#[serde(rename = "state")]
	pub token: String,
	/// User that started the authorization.
	pub user_id: UserId,
	/// Organization that started the authorization.
	pub org_id: OrgId,
	/// True when the authorization was started against the fixture client.
	#[serde(default)]
	pub mock: bool,
}
impl PendingState {
	/// Issues a state with a fresh nonce.
	pub fn issue(user_id: UserId, org_id: OrgId, mock: bool) -> Self {
		Self { token: random_token(), user_id, org_id, mock }
	}

	/// JSON document kept in the store.
	pub fn to_json(&self) -> Result<String, StateError> {
		serde_json::to_string(self).map_err(|e| StateError::Malformed { reason: e.to_string() })
	}

	/// URL-safe string carried through the provider redirect.
	pub fn encode(&self) -> Result<String, StateError> {
		Ok(URL_SAFE_NO_PAD.encode(self.to_json()?))
	}

	/// Decodes the string returned on the callback.
	///
	/// Undecodable input yields [`StateError::Malformed`]; a document lacking the nonce or
	/// either identifier yields [`StateError::IncompleteData`].
	pub fn decode(encoded: &str) -> Result<Self, StateError> {
		let bytes = URL_SAFE_NO_PAD
			.decode(encoded.trim_end_matches('='))
			.map_err(|e| StateError::Malformed { reason: e.to_string() })?;
		let claims = serde_json::from_slice::<StateClaims>(&bytes)
			.map_err(|e| StateError::Malformed { reason: e.to_string() })?;

		claims.into_state().ok_or(StateError::IncompleteData)
	}

	/// Checks this (returned) state against the stored JSON for the same identity.
	pub fn verify_against(&self, saved: &str) -> Result<(), StateError> {
		let saved = serde_json::from_str::<StateClaims>(saved)
			.ok()
			.and_then(|claims| claims.token.filter(|token| !token.is_empty()))
			.ok_or(StateError::InvalidSaved)?;

		if bool::from(self.token.as_bytes().ct_eq(saved.as_bytes())) {
			Ok(())
		} else {
			Err(StateError::Mismatch)
		}
	}
}
impl Debug for PendingState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PendingState")
			.field("token", &"<redacted>")
			.field("user_id", &self.user_id)
			.field("org_id", &self.org_id)
			.field("mock", &self.mock)
			.finish()
	}
}

#[derive(Deserialize)]
struct StateClaims {
	#[serde(default, rename = "state")]
	token: Option<String>,
	#[serde(default)]
	user_id: Option<String>,
	#[serde(default)]
	org_id: Option<String>,
	#[serde(default)]
	mock: Option<bool>,
}
impl StateClaims {
	fn into_state(self) -> Option<PendingState> {
		let token = self.token.filter(|token| !token.is_empty())?;
		let user_id = UserId::new(self.user_id?).ok()?;
		let org_id = OrgId::new(self.org_id?).ok()?;

		Some(PendingState { token, user_id, org_id, mock: self.mock.unwrap_or_default() })
	}
}

fn random_token() -> String {
	let mut bytes = [0_u8; TOKEN_BYTES];

	rand::rng().fill(&mut bytes);

	URL_SAFE_NO_PAD.encode(bytes)
}
