//! Provider descriptor data structures shared by all flows.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{ProviderId, ScopeSet},
	catalog::ObjectKind,
	error::ConfigError,
};

const HUBSPOT_AUTHORIZATION: &str = "https://app.hubspot.com/oauth/authorize";
const HUBSPOT_TOKEN: &str = "https://api.hubapi.com/oauth/v1/token";
const HUBSPOT_API_BASE: &str = "https://api.hubapi.com";
const HUBSPOT_APP_BASE: &str = "https://app.hubspot.com";
const HUBSPOT_SCOPES: [&str; 4] = [
	"oauth",
	"crm.objects.contacts.read",
	"crm.objects.companies.read",
	"crm.objects.deals.read",
];

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Consent page the user is redirected to.
	pub authorization: Url,
	/// Token endpoint used for code exchanges.
	pub token: Url,
	/// Root of the CRM REST API.
	pub api_base: Url,
	/// Root of the web app that deep links point into.
	pub app_base: Url,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Scopes requested on every authorization.
	pub scope: ScopeSet,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Production HubSpot descriptor requesting read access to contacts, companies, and deals.
	pub fn hubspot() -> Result<Self> {
		let id = ProviderId::new("hubspot")?;
		let scope = ScopeSet::new(HUBSPOT_SCOPES).map_err(ConfigError::from)?;
		let descriptor = Self::builder(id)
			.authorization_endpoint(parse_const("authorization", HUBSPOT_AUTHORIZATION)?)
			.token_endpoint(parse_const("token", HUBSPOT_TOKEN)?)
			.api_base(parse_const("api", HUBSPOT_API_BASE)?)
			.app_base(parse_const("app", HUBSPOT_APP_BASE)?)
			.scope(scope)
			.build()
			.map_err(ConfigError::from)?;

		Ok(descriptor)
	}

	/// Object-list endpoint for `kind`: `{api_base}/crm/v3/objects/{kind}`.
	pub fn object_list_url(&self, kind: ObjectKind) -> Url {
		append_segments(&self.endpoints.api_base, &["crm", "v3", "objects", kind.as_str()])
	}

	/// Deep link into the web app: `{app_base}/contacts/{id}[/{suffix}]`.
	pub fn record_url(&self, id: &str, suffix: Option<&str>) -> Url {
		match suffix {
			Some(suffix) => append_segments(&self.endpoints.app_base, &["contacts", id, suffix]),
			None => append_segments(&self.endpoints.app_base, &["contacts", id]),
		}
	}
}

fn parse_const(field: &'static str, raw: &str) -> Result<Url> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { field, source }.into())
}

fn append_segments(base: &Url, segments: &[&str]) -> Url {
	let mut url = base.clone();

	// Descriptor validation only admits http(s) bases, which always accept path segments.
	if let Ok(mut path) = url.path_segments_mut() {
		path.pop_if_empty().extend(segments);
	}

	url
}
