//! Optional observability helpers for integration flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `hubspot_integration.flow` with the `flow`
//!   and `stage` (call site) fields, plus a warning event for every skipped object kind.
//! - Enable `metrics` to increment the `hubspot_integration_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`, and the
//!   `hubspot_integration_fetch_failure_total` counter labeled by `kind`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, catalog::ObjectKind, provider::CallError};

/// Integration flows observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Consent URL issuance.
	Authorize,
	/// Redirect handling and code exchange.
	Callback,
	/// Single-use credential pickup.
	Credentials,
	/// CRM catalog fetch.
	Catalog,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::Callback => "callback",
			FlowKind::Credentials => "credentials",
			FlowKind::Catalog => "catalog",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Logs and counts an object kind skipped during a catalog fetch.
pub fn record_fetch_failure(kind: ObjectKind, error: &CallError) {
	trace_fetch_failure(kind, error);
	count_fetch_failure(kind);
}
