//! CRM catalog fetch.

// crates.io
use futures::future;
// self
use crate::{
	_prelude::*,
	auth::CredentialBlob,
	catalog::{FetchOutcome, ItemCatalog, ObjectKind},
	flows::Integration,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::{FixtureProviderClient, ListObjectsRequest, ProviderClient},
};

impl Integration {
	/// Lists contacts, companies, and deals concurrently and maps them into integration items.
	///
	/// Credentials carrying the fixture access token are served by the fixture client. A
	/// rejected token on contacts aborts with [`Error::UpstreamUnauthorized`]; any other
	/// per-kind failure is reported in [`ItemCatalog::failures`] while the remaining kinds are
	/// still returned.
	pub async fn fetch_all_items(&self, credentials: &CredentialBlob) -> Result<ItemCatalog> {
		const KIND: FlowKind = FlowKind::Catalog;

		let span = FlowSpan::new(KIND, "fetch_all_items");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let access_token = credentials.access_token()?;
				let client: &dyn ProviderClient = if credentials.is_mock() {
					&FixtureProviderClient
				} else {
					self.client.as_ref()
				};
				let outcomes = future::join_all(ObjectKind::ALL.map(|kind| async move {
					let result = client
						.list_objects(ListObjectsRequest {
							descriptor: &self.descriptor,
							kind,
							access_token,
							limit: self.config.page_size,
						})
						.await;

					FetchOutcome { kind, result }
				}))
				.await;

				ItemCatalog::from_outcomes(&self.descriptor, outcomes)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}
}
