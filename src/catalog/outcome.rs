//! Reduction of per-kind listing results into an item catalog.

// self
use crate::{
	_prelude::*,
	catalog::{IntegrationItem, ItemType, ObjectKind, map_item},
	obs,
	provider::{CallError, ObjectPage, ProviderDescriptor},
};

/// Result of listing one object kind.
#[derive(Debug)]
pub struct FetchOutcome {
	/// Kind that was listed.
	pub kind: ObjectKind,
	/// Page of raw records, or the call failure.
	pub result: Result<ObjectPage, CallError>,
}

/// Object kind that could not be listed during a catalog fetch.
#[derive(Debug)]
pub struct CategoryFailure {
	/// Kind that failed.
	pub kind: ObjectKind,
	/// Underlying call failure.
	pub error: CallError,
}

/// Items gathered by a catalog fetch plus the kinds that were skipped.
#[derive(Debug, Default)]
pub struct ItemCatalog {
	/// Contacts first, then companies, then deals; provider order within each kind.
	pub items: Vec<IntegrationItem>,
	/// Non-fatal per-kind failures, in fetch order.
	pub failures: Vec<CategoryFailure>,
}
impl ItemCatalog {
	/// Reduces ordered per-kind outcomes into a catalog.
	///
	/// A rejected token on the primary kind aborts with [`Error::UpstreamUnauthorized`]; every
	/// other failure is recorded and the remaining kinds are still returned.
	pub fn from_outcomes(
		descriptor: &ProviderDescriptor,
		outcomes: impl IntoIterator<Item = FetchOutcome>,
	) -> Result<Self> {
		let mut catalog = Self::default();

		for FetchOutcome { kind, result } in outcomes {
			match result {
				Ok(page) => {
					let item_type = kind.item_type();

					catalog
						.items
						.extend(page.results.iter().map(|record| map_item(descriptor, record, &item_type)));
				},
				Err(error) if kind.is_primary() && error.is_unauthorized() =>
					return Err(Error::UpstreamUnauthorized),
				Err(error) => {
					obs::record_fetch_failure(kind, &error);
					catalog.failures.push(CategoryFailure { kind, error });
				},
			}
		}

		Ok(catalog)
	}

	/// Returns true when every kind was listed.
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty()
	}

	/// Number of items gathered.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns true when no items were gathered.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Items of a single type.
	pub fn of_type<'a>(
		&'a self,
		item_type: &'a ItemType,
	) -> impl Iterator<Item = &'a IntegrationItem> + 'a {
		self.items.iter().filter(move |item| &item.item_type == item_type)
	}

	/// Discards failure details and returns the items.
	pub fn into_items(self) -> Vec<IntegrationItem> {
		self.items
	}
}
