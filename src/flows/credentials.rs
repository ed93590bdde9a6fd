//! Single-use credential pickup.

// self
use crate::{
	_prelude::*,
	auth::{CredentialBlob, OrgId, UserId},
	flows::{Integration, common},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::StoreKey,
};

impl Integration {
	/// Returns the credentials stored by the callback and deletes them.
	///
	/// A second call for the same identity fails with [`Error::CredentialsNotFound`] until a
	/// new authorization completes. Unparseable payloads are left in place and reported as
	/// [`Error::InvalidCredentialsData`].
	pub async fn fetch_credentials(
		&self,
		user_id: &UserId,
		org_id: &OrgId,
	) -> Result<CredentialBlob> {
		const KIND: FlowKind = FlowKind::Credentials;

		let span = FlowSpan::new(KIND, "fetch_credentials");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let key = StoreKey::credentials(org_id, user_id);
				let guard = common::flow_guard(self, &key);
				let result = {
					let _held = guard.lock().await;

					self.take_credentials(&key).await
				};

				common::release_guard(self, &key, guard);

				result
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn take_credentials(&self, key: &StoreKey) -> Result<CredentialBlob> {
		let raw = self
			.store
			.get(key.as_str())
			.await
			.map_err(Error::from)?
			.ok_or(Error::CredentialsNotFound)?;
		let credentials = CredentialBlob::from_json(&raw)?;

		self.store.delete(key.as_str()).await.map_err(Error::from)?;

		Ok(credentials)
	}
}
