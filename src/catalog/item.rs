//! Integration item model and the CRM object kinds it is built from.

// self
use crate::_prelude::*;

/// CRM object collections listed by the catalog fetch, in fetch order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
	/// `crm/v3/objects/contacts`.
	Contacts,
	/// `crm/v3/objects/companies`.
	Companies,
	/// `crm/v3/objects/deals`.
	Deals,
}
impl ObjectKind {
	/// Every kind, in the order results are aggregated.
	pub const ALL: [Self; 3] = [Self::Contacts, Self::Companies, Self::Deals];

	/// Path segment used by the object-list endpoint.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Contacts => "contacts",
			Self::Companies => "companies",
			Self::Deals => "deals",
		}
	}

	/// Item type assigned to records of this kind.
	pub fn item_type(self) -> ItemType {
		match self {
			Self::Contacts => ItemType::Contact,
			Self::Companies => ItemType::Company,
			Self::Deals => ItemType::Deal,
		}
	}

	/// The primary kind: a rejected token here aborts the whole fetch.
	pub const fn is_primary(self) -> bool {
		matches!(self, Self::Contacts)
	}
}
impl Display for ObjectKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Type label carried by an [`IntegrationItem`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
	/// CRM contact.
	Contact,
	/// CRM company.
	Company,
	/// CRM deal.
	Deal,
	/// Any other object type, kept by label.
	Other(String),
}
impl ItemType {
	/// Human-readable label (`Contact`, `Company`, ...).
	pub fn label(&self) -> &str {
		match self {
			Self::Contact => "Contact",
			Self::Company => "Company",
			Self::Deal => "Deal",
			Self::Other(label) => label,
		}
	}

	/// Segment appended after the record id in deep links.
	pub fn link_suffix(&self) -> Option<&'static str> {
		match self {
			Self::Company => Some("company"),
			Self::Deal => Some("deal"),
			Self::Contact | Self::Other(_) => None,
		}
	}
}
impl Display for ItemType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.label())
	}
}
impl From<&str> for ItemType {
	fn from(value: &str) -> Self {
		match value {
			"Contact" => Self::Contact,
			"Company" => Self::Company,
			"Deal" => Self::Deal,
			other => Self::Other(other.to_owned()),
		}
	}
}
impl From<String> for ItemType {
	fn from(value: String) -> Self {
		match value.as_str() {
			"Contact" | "Company" | "Deal" => Self::from(value.as_str()),
			_ => Self::Other(value),
		}
	}
}
impl From<ItemType> for String {
	fn from(value: ItemType) -> Self {
		match value {
			ItemType::Other(label) => label,
			known => known.label().to_owned(),
		}
	}
}

/// Platform-neutral representation of one CRM object.
///
/// Timestamps are kept in UTC; convert them with [`OffsetDateTime::to_offset`] when presenting
/// them in a local zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationItem {
	/// Provider object id, stringified.
	pub id: String,
	/// Object type.
	#[serde(rename = "type")]
	pub item_type: ItemType,
	/// Display name derived from the object's properties.
	pub name: String,
	/// Creation instant in UTC, when the provider supplied a readable one.
	#[serde(with = "time::serde::rfc3339::option")]
	pub creation_time: Option<OffsetDateTime>,
	/// Last modification instant in UTC, when the provider supplied a readable one.
	#[serde(with = "time::serde::rfc3339::option")]
	pub last_modified_time: Option<OffsetDateTime>,
	/// Deep link into the provider's web app.
	pub url: Url,
	/// Whether the object is visible; HubSpot exposes no archival signal on these endpoints.
	pub visibility: bool,
}
