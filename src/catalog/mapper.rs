//! Record-to-item mapping.
//!
//! Every field is best-effort: a missing or unreadable property falls back to a derived
//! default instead of failing the record.

// crates.io
use serde_json::{Map, Value};
use time::{UtcOffset, format_description::well_known::Rfc3339};
// self
use crate::{
	_prelude::*,
	catalog::{IntegrationItem, ItemType},
	provider::ProviderDescriptor,
};

/// Maps one raw CRM record into an [`IntegrationItem`] of `item_type`.
///
/// Deep links are built from the descriptor's app base: `contacts/{id}` for contacts and
/// unknown types, `contacts/{id}/company` and `contacts/{id}/deal` otherwise.
pub fn map_item(
	descriptor: &ProviderDescriptor,
	record: &Value,
	item_type: &ItemType,
) -> IntegrationItem {
	let id = record_id(record);
	let empty = Map::new();
	let properties = record.get("properties").and_then(Value::as_object).unwrap_or(&empty);
	let name = derive_name(item_type, &id, properties);
	let url = descriptor.record_url(&id, item_type.link_suffix());

	IntegrationItem {
		creation_time: parse_timestamp(record.get("createdAt")),
		last_modified_time: parse_timestamp(record.get("updatedAt")),
		id,
		item_type: item_type.to_owned(),
		name,
		url,
		visibility: true,
	}
}

/// Parses a provider timestamp: epoch milliseconds (number or numeric string) or RFC 3339.
///
/// Results are kept in UTC; rendering in a local zone is left to the caller.
pub fn parse_timestamp(value: Option<&Value>) -> Option<OffsetDateTime> {
	match value? {
		Value::Number(number) => number
			.as_i64()
			.or_else(|| number.as_f64().filter(|ms| ms.is_finite()).map(|ms| ms as i64))
			.and_then(from_millis),
		Value::String(raw) => {
			let raw = raw.trim();

			raw.parse::<i64>()
				.ok()
				.and_then(from_millis)
				.or_else(|| OffsetDateTime::parse(raw, &Rfc3339).ok())
				.map(|at| at.to_offset(UtcOffset::UTC))
		},
		_ => None,
	}
}

fn from_millis(ms: i64) -> Option<OffsetDateTime> {
	OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

fn record_id(record: &Value) -> String {
	match record.get("id") {
		Some(Value::String(id)) => id.to_owned(),
		Some(Value::Number(id)) => id.to_string(),
		_ => String::new(),
	}
}

fn derive_name(item_type: &ItemType, id: &str, properties: &Map<String, Value>) -> String {
	let text = |key: &str| {
		properties.get(key).and_then(Value::as_str).map(str::trim).filter(|v| !v.is_empty())
	};

	match item_type {
		ItemType::Contact => {
			let full = format!(
				"{} {}",
				text("firstname").unwrap_or_default(),
				text("lastname").unwrap_or_default()
			);
			let full = full.trim();

			if !full.is_empty() {
				full.to_owned()
			} else {
				text("email").map(str::to_owned).unwrap_or_else(|| format!("Contact {id}"))
			}
		},
		ItemType::Company =>
			text("name").map(str::to_owned).unwrap_or_else(|| format!("Company {id}")),
		ItemType::Deal =>
			text("dealname").map(str::to_owned).unwrap_or_else(|| format!("Deal {id}")),
		ItemType::Other(label) => format!("{label} {id}"),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn descriptor() -> ProviderDescriptor {
		ProviderDescriptor::hubspot().expect("HubSpot descriptor should build.")
	}

	#[test]
	fn contact_uses_full_name_and_epoch_millis() {
		let record = json!({
			"id": 42,
			"properties": { "firstname": "A", "lastname": "B" },
			"createdAt": 0
		});
		let item = map_item(&descriptor(), &record, &ItemType::Contact);

		assert_eq!(item.id, "42");
		assert_eq!(item.name, "A B");
		assert_eq!(item.creation_time, Some(OffsetDateTime::UNIX_EPOCH));
		assert_eq!(item.last_modified_time, None);
		assert_eq!(item.url.as_str(), "https://app.hubspot.com/contacts/42");
		assert!(item.visibility);
	}

	#[test]
	fn contact_name_falls_back_to_email_then_id() {
		let with_email = json!({ "id": "7", "properties": { "email": "a@example.com" } });
		let bare = json!({ "id": "8", "properties": { "firstname": null, "lastname": " " } });

		assert_eq!(map_item(&descriptor(), &with_email, &ItemType::Contact).name, "a@example.com");
		assert_eq!(map_item(&descriptor(), &bare, &ItemType::Contact).name, "Contact 8");
	}

	#[test]
	fn company_deal_and_other_names_and_links() {
		let company = json!({ "id": "2", "properties": { "name": "Acme" } });
		let deal = json!({ "id": "3", "properties": {} });
		let ticket = json!({ "id": "4" });
		let company = map_item(&descriptor(), &company, &ItemType::Company);
		let deal = map_item(&descriptor(), &deal, &ItemType::Deal);
		let ticket = map_item(&descriptor(), &ticket, &ItemType::Other("Ticket".into()));

		assert_eq!(company.name, "Acme");
		assert_eq!(company.url.as_str(), "https://app.hubspot.com/contacts/2/company");
		assert_eq!(deal.name, "Deal 3");
		assert_eq!(deal.url.as_str(), "https://app.hubspot.com/contacts/3/deal");
		assert_eq!(ticket.name, "Ticket 4");
		assert_eq!(ticket.url.as_str(), "https://app.hubspot.com/contacts/4");
	}

	#[test]
	fn unreadable_timestamps_become_none() {
		assert_eq!(parse_timestamp(Some(&json!("not a time"))), None);
		assert_eq!(parse_timestamp(Some(&json!({ "ms": 1 }))), None);
		assert_eq!(parse_timestamp(Some(&json!(i64::MAX))), None);
		assert_eq!(parse_timestamp(None), None);
	}

	#[test]
	fn string_timestamps_accept_millis_and_rfc3339() {
		let expected = OffsetDateTime::from_unix_timestamp(1_700_000_000)
			.expect("Fixture timestamp should be in range.");

		assert_eq!(parse_timestamp(Some(&json!("1700000000000"))), Some(expected));
		assert_eq!(parse_timestamp(Some(&json!("2023-11-14T22:13:20Z"))), Some(expected));
		assert_eq!(parse_timestamp(Some(&json!(1_700_000_000_000_u64))), Some(expected));
	}

	#[test]
	fn offset_timestamps_are_normalized_to_utc() {
		let parsed = parse_timestamp(Some(&json!("2023-11-15T00:13:20+02:00")))
			.expect("Offset timestamp should parse.");

		assert_eq!(parsed.offset(), UtcOffset::UTC);
		assert_eq!(parsed.unix_timestamp(), 1_700_000_000);
		assert_eq!(
			parse_timestamp(Some(&json!(0))).map(OffsetDateTime::offset),
			Some(UtcOffset::UTC)
		);
	}

	#[test]
	fn missing_id_maps_to_empty_string() {
		let item = map_item(&descriptor(), &json!({ "properties": {} }), &ItemType::Deal);

		assert_eq!(item.id, "");
		assert_eq!(item.name, "Deal ");
	}
}
