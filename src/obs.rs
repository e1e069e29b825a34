//! Optional observability helpers for the gate.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `bearer_gate.gate` carrying a `stage` field, plus a
//!   `debug`/`warn` event for every decision that leaves the request unsigned.
//! - Enable `metrics` to increment the `bearer_gate_decision_total` counter for every intercepted
//!   request, labeled by `decision`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};
