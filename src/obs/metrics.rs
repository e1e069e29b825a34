// self
use crate::gate::GateDecision;

/// Records a gate decision via the global metrics recorder (when enabled).
pub fn record_decision(decision: GateDecision) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("bearer_gate_decision_total", "decision" => decision.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = decision;
	}
}
