#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use hubspot_integration::{
	_preludet::*,
	auth::{CredentialBlob, TokenSecret},
	catalog::{ItemType, ObjectKind},
	flows::Integration,
	provider::LiveProviderClient,
	store::{KeyValueStore, MemoryStore},
};

fn credentials(token: &str) -> CredentialBlob {
	CredentialBlob { access_token: Some(TokenSecret::new(token)), ..Default::default() }
}

async fn mock_list<'a>(
	server: &'a MockServer,
	kind: &str,
	status: u16,
	body: &str,
) -> httpmock::Mock<'a> {
	let path = format!("/crm/v3/objects/{kind}");
	let body = body.to_owned();

	server
		.mock_async(move |when, then| {
			when.method(GET)
				.path(path.as_str())
				.query_param("limit", "100")
				.header("authorization", "Bearer live-token");
			then.status(status).header("content-type", "application/json").body(body.as_str());
		})
		.await
}

#[tokio::test]
async fn catalog_maps_every_kind_in_fetch_order() {
	let server = MockServer::start_async().await;
	let (integration, _) = build_reqwest_test_integration(mock_descriptor(&server.base_url()));
	let contacts = mock_list(
		&server,
		"contacts",
		200,
		r#"{"results":[{"id":"11","properties":{"firstname":"Ada","lastname":"Lovelace"},"createdAt":"2024-01-02T03:04:05.000Z","updatedAt":"1704164645000"},{"id":"12","properties":{"email":"grace@example.com"}}]}"#,
	)
	.await;
	let companies =
		mock_list(&server, "companies", 200, r#"{"results":[{"id":"21","properties":{"name":"Acme"}}]}"#)
			.await;
	let deals =
		mock_list(&server, "deals", 200, r#"{"results":[{"id":33,"properties":{"dealname":null}}]}"#)
			.await;
	let catalog = integration
		.fetch_all_items(&credentials("live-token"))
		.await
		.expect("Catalog fetch should succeed.");

	contacts.assert_async().await;
	companies.assert_async().await;
	deals.assert_async().await;

	assert!(catalog.is_complete());

	let summary = catalog
		.items
		.iter()
		.map(|item| (item.item_type.label(), item.id.as_str(), item.name.as_str()))
		.collect::<Vec<_>>();

	assert_eq!(
		summary,
		vec![
			("Contact", "11", "Ada Lovelace"),
			("Contact", "12", "grace@example.com"),
			("Company", "21", "Acme"),
			("Deal", "33", "Deal 33"),
		]
	);

	let ada = &catalog.items[0];

	assert_eq!(ada.creation_time, ada.last_modified_time);
	assert!(ada.creation_time.is_some());
	assert_eq!(catalog.items[2].url.as_str(), "https://app.hubspot.com/contacts/21/company");
	assert!(catalog.items.iter().all(|item| item.visibility));
}

#[tokio::test]
async fn unauthorized_contacts_abort_the_whole_fetch() {
	let server = MockServer::start_async().await;
	let (integration, _) = build_reqwest_test_integration(mock_descriptor(&server.base_url()));
	let _contacts = mock_list(&server, "contacts", 401, r#"{"category":"EXPIRED_AUTHENTICATION"}"#).await;
	let _companies = mock_list(&server, "companies", 200, r#"{"results":[{"id":"21"}]}"#).await;
	let _deals = mock_list(&server, "deals", 200, r#"{"results":[{"id":"31"}]}"#).await;
	let err = integration
		.fetch_all_items(&credentials("live-token"))
		.await
		.expect_err("Unauthorized contacts should abort.");

	assert!(matches!(err, Error::UpstreamUnauthorized));
	assert_eq!(err.http_status(), 401);
}

#[tokio::test]
async fn failing_companies_degrade_to_partial_results() {
	let server = MockServer::start_async().await;
	let (integration, _) = build_reqwest_test_integration(mock_descriptor(&server.base_url()));
	let _contacts = mock_list(&server, "contacts", 200, r#"{"results":[{"id":"11"}]}"#).await;
	let _companies = mock_list(&server, "companies", 500, r#"{"status":"error"}"#).await;
	let _deals = mock_list(&server, "deals", 401, r#"{"status":"error"}"#).await;
	let catalog = integration
		.fetch_all_items(&credentials("live-token"))
		.await
		.expect("Non-primary failures should not abort.");

	assert_eq!(catalog.len(), 1);
	assert_eq!(catalog.items[0].name, "Contact 11");
	assert!(!catalog.is_complete());
	assert_eq!(
		catalog.failures.iter().map(|failure| failure.kind).collect::<Vec<_>>(),
		vec![ObjectKind::Companies, ObjectKind::Deals]
	);
	assert_eq!(catalog.failures[0].error.status(), Some(500));
}

#[tokio::test]
async fn transport_failures_are_isolated_per_kind() {
	let (integration, _) = build_reqwest_test_integration(mock_descriptor("http://127.0.0.1:9"));
	let catalog = integration
		.fetch_all_items(&credentials("live-token"))
		.await
		.expect("Transport failures should not abort.");

	assert!(catalog.is_empty());
	assert_eq!(catalog.failures.len(), 3);
	assert!(catalog.failures.iter().all(|failure| failure.error.status().is_none()));
}

#[tokio::test]
async fn mock_token_serves_the_fixture_catalog_without_network() {
	let server = MockServer::start_async().await;
	let (integration, _) = build_reqwest_test_integration(mock_descriptor(&server.base_url()));
	let catalog = integration
		.fetch_all_items(&CredentialBlob::mock())
		.await
		.expect("Fixture catalog should load.");
	let ids = catalog.items.iter().map(|item| item.id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, vec!["1001", "1002", "2001", "3001"]);
	assert_eq!(catalog.of_type(&ItemType::Contact).count(), 2);
	assert_eq!(catalog.of_type(&ItemType::Company).count(), 1);
	assert_eq!(catalog.of_type(&ItemType::Deal).count(), 1);
	assert_eq!(catalog.items[0].name, "John Doe");
	assert_eq!(catalog.items[3].name, "Enterprise Deal Q1");
	assert!(catalog.items.iter().all(|item| item.creation_time.is_some()));
}

#[tokio::test]
async fn live_client_does_not_follow_redirects() {
	let server = MockServer::start_async().await;
	let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
	let client = LiveProviderClient::build().expect("Live client should build.");
	let integration =
		Integration::new(test_config(), mock_descriptor(&server.base_url()), store, Arc::new(client));
	let target = server
		.mock_async(|when, then| {
			when.method(GET).path("/moved");
			then.status(200).header("content-type", "application/json").body(r#"{"results":[]}"#);
		})
		.await;
	let _contacts = server
		.mock_async(|when, then| {
			when.path("/crm/v3/objects/contacts");
			then.status(302).header("location", "/moved");
		})
		.await;
	let _companies = mock_list(&server, "companies", 200, r#"{"results":[]}"#).await;
	let _deals = mock_list(&server, "deals", 200, r#"{"results":[]}"#).await;
	let catalog = integration
		.fetch_all_items(&credentials("live-token"))
		.await
		.expect("A redirect on contacts is not an authorization failure.");

	target.assert_calls_async(0).await;
	assert_eq!(catalog.failures.len(), 1);
	assert_eq!(catalog.failures[0].kind, ObjectKind::Contacts);
	assert_eq!(catalog.failures[0].error.status(), Some(302));
}

#[tokio::test]
async fn fixture_catalog_ignores_the_page_size() {
	let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
	let integration = Integration::fixture(test_config().with_page_size(1), store)
		.expect("Fixture integration should build.");
	let catalog = integration
		.fetch_all_items(&CredentialBlob::mock())
		.await
		.expect("Fixture catalog should load.");
	let ids = catalog.items.iter().map(|item| item.id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, vec!["1001", "1002", "2001", "3001"]);
	assert!(catalog.is_complete());
}

#[tokio::test]
async fn missing_access_token_is_rejected() {
	let (integration, _) = build_fixture_test_integration();
	let err = integration
		.fetch_all_items(&CredentialBlob::default())
		.await
		.expect_err("Credentials without a token should fail.");

	assert!(matches!(err, Error::NoAccessToken));
	assert!(matches!(
		integration.fetch_all_items(&credentials("")).await,
		Err(Error::NoAccessToken)
	));
}
