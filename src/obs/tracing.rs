// self
use crate::{_prelude::*, gate::GateDecision};

/// Future returned by [`GateSpan::instrument`].
#[cfg(feature = "tracing")]
pub type InstrumentedGate<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`GateSpan::instrument`].
#[cfg(not(feature = "tracing"))]
pub type InstrumentedGate<F> = F;

/// `bearer_gate.gate` span carrying the pipeline stage and, once known, the gate decision.
///
/// Compiles to an empty value without the `tracing` feature.
#[derive(Clone, Debug)]
pub struct GateSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl GateSpan {
	/// Opens a span for `stage` with an empty `decision` field.
	pub fn new(stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self {
				span: tracing::debug_span!(
					"bearer_gate.gate",
					stage,
					decision = tracing::field::Empty
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = stage;

			Self {}
		}
	}

	/// Fills the `decision` field with the decision's stable label.
	pub fn record_decision(&self, decision: GateDecision) {
		#[cfg(feature = "tracing")]
		self.span.record("decision", decision.as_str());

		#[cfg(not(feature = "tracing"))]
		{
			let _ = decision;
		}
	}

	/// Runs a synchronous section inside the span.
	pub fn in_scope<F, T>(&self, f: F) -> T
	where
		F: FnOnce() -> T,
	{
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(f)
		}
		#[cfg(not(feature = "tracing"))]
		{
			f()
		}
	}

	/// Attaches the span to `fut`; no guard is held across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedGate<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a log event for a decision that left the request unsigned.
///
/// Token values never reach the event; only the decision label and request method do.
pub fn log_decision(decision: GateDecision, method: &http::Method) {
	#[cfg(feature = "tracing")]
	match decision {
		GateDecision::Attached => {},
		GateDecision::UnencodableToken => tracing::warn!(
			decision = decision.as_str(),
			%method,
			"session token is not a valid header value; forwarding request unsigned"
		),
		GateDecision::NoToken | GateDecision::OutOfScope => {
			tracing::debug!(decision = decision.as_str(), %method, "forwarding request unsigned")
		},
	}

	#[cfg(not(feature = "tracing"))]
	{
		let _ = (decision, method);
	}
}
