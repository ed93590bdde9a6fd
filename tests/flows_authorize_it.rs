// self
use hubspot_integration::{
	_preludet::*,
	auth::{OrgId, UserId},
	flows::{CallbackParams, PendingState},
	provider::ProviderDescriptor,
	store::{KeyValueStore, StoreKey},
};

fn identity() -> (UserId, OrgId) {
	(
		UserId::new("user-123").expect("User identifier should be valid for authorize test."),
		OrgId::new("org-456").expect("Org identifier should be valid for authorize test."),
	)
}

#[tokio::test]
async fn live_authorization_url_carries_registration_scope_and_state() {
	let descriptor = ProviderDescriptor::hubspot().expect("HubSpot descriptor should build.");
	let (integration, store) = build_reqwest_test_integration(descriptor);
	let (user, org) = identity();
	let url = integration
		.begin_authorization(&user, &org)
		.await
		.expect("Authorization should start successfully.");
	let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

	assert_eq!(url.host_str(), Some("app.hubspot.com"));
	assert_eq!(url.path(), "/oauth/authorize");
	assert_eq!(pairs.get("client_id"), Some(&TEST_CLIENT_ID.into()));
	assert_eq!(pairs.get("redirect_uri"), Some(&TEST_REDIRECT_URI.into()));
	assert_eq!(
		pairs.get("scope"),
		Some(
			&"crm.objects.companies.read crm.objects.contacts.read crm.objects.deals.read oauth"
				.into()
		)
	);

	let state = PendingState::decode(pairs.get("state").expect("URL should carry a state."))
		.expect("Issued state should decode.");

	assert_eq!(state.user_id, user);
	assert_eq!(state.org_id, org);
	assert!(!state.mock);

	let saved = store
		.get(StoreKey::state(&org, &user).as_str())
		.await
		.expect("Store read should succeed.")
		.expect("Pending state should be stored.");

	assert!(state.verify_against(&saved).is_ok());
}

#[tokio::test]
async fn fixture_authorization_redirects_straight_to_the_callback() {
	let (integration, _) = build_fixture_test_integration();
	let (user, org) = identity();
	let url = integration
		.begin_authorization(&user, &org)
		.await
		.expect("Authorization should start successfully.");
	let params = CallbackParams::from_url(&url);

	assert!(url.as_str().starts_with(TEST_REDIRECT_URI));
	assert_eq!(params.code.as_deref(), Some("mock_code"));

	let state = PendingState::decode(params.state.as_deref().expect("URL should carry a state."))
		.expect("Issued state should decode.");

	assert!(state.mock);
}

#[tokio::test]
async fn newer_authorization_replaces_the_pending_state() {
	let (integration, store) = build_fixture_test_integration();
	let (user, org) = identity();
	let first = integration
		.begin_authorization(&user, &org)
		.await
		.expect("First authorization should start successfully.");
	let second = integration
		.begin_authorization(&user, &org)
		.await
		.expect("Second authorization should start successfully.");

	assert_eq!(store.len(), 1);

	let stale = integration
		.handle_callback(&CallbackParams::from_url(&first))
		.await
		.expect_err("Superseded state should be rejected.");

	assert!(matches!(stale, Error::InvalidState(_)));
	assert_eq!(stale.to_string(), "State does not match.");

	integration
		.handle_callback(&CallbackParams::from_url(&second))
		.await
		.expect("Latest state should validate.");
}
