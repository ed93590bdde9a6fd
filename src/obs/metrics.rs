// self
use crate::{
	catalog::ObjectKind,
	obs::{FlowKind, FlowOutcome},
};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"hubspot_integration_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts an object kind skipped during a catalog fetch (when enabled).
pub fn count_fetch_failure(kind: ObjectKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("hubspot_integration_fetch_failure_total", "kind" => kind.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = kind;
	}
}
