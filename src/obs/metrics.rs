// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome for `provider` via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, provider: &str, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_quirks_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str(),
			"provider" => provider.to_owned()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, provider, outcome);
	}
}

/// Records the success or failure of a finished flow.
pub fn record_flow_result<T, E>(kind: FlowKind, provider: &str, result: &Result<T, E>) {
	let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

	record_flow_outcome(kind, provider, outcome);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recording_is_a_noop_without_recorder() {
		record_flow_outcome(FlowKind::Resource, "strava", FlowOutcome::Attempt);
		record_flow_result::<(), ()>(FlowKind::Profile, "My IdP", &Err(()));
	}
}
