//! Shared helpers for flow implementations (per-identity guards).

// self
use crate::{_prelude::*, flows::Integration, store::StoreKey};

/// Returns (and creates on demand) the guard serializing flows on a store key.
pub(crate) fn flow_guard(integration: &Integration, key: &StoreKey) -> Arc<AsyncMutex<()>> {
	let mut guards = integration.flow_guards.lock();

	guards.entry(key.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
}

/// Drops the guard for `key` once no other flow holds or awaits it.
pub(crate) fn release_guard(integration: &Integration, key: &StoreKey, guard: Arc<AsyncMutex<()>>) {
	let mut guards = integration.flow_guards.lock();

	// One reference lives in the map and one is `guard` itself.
	if Arc::strong_count(&guard) <= 2 {
		guards.remove(key);
	}
}
