//! Consent URL issuance.

// self
use crate::{
	_prelude::*,
	auth::{OrgId, UserId},
	flows::{Integration, PendingState},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{AuthorizeRequest, ClientMode},
	store::StoreKey,
};

impl Integration {
	/// Issues a pending state for the identity and returns the consent URL carrying it.
	///
	/// The stored state replaces any earlier one for the same identity, so only the most
	/// recent consent URL can complete the callback. No provider call is made.
	pub async fn begin_authorization(&self, user_id: &UserId, org_id: &OrgId) -> Result<Url> {
		const KIND: FlowKind = FlowKind::Authorize;

		let span = FlowSpan::new(KIND, "begin_authorization");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mock = self.mode() == ClientMode::Fixture;
				let state = PendingState::issue(user_id.clone(), org_id.clone(), mock);
				let encoded = state.encode()?;
				let key = StoreKey::state(org_id, user_id);

				self.store
					.set(key.as_str(), state.to_json()?, Some(self.config.state_ttl))
					.await
					.map_err(Error::from)?;

				Ok(self.client.authorize_url(&AuthorizeRequest {
					descriptor: &self.descriptor,
					client_id: &self.config.client_id,
					redirect_uri: &self.config.redirect_uri,
					state: &encoded,
				}))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
