//! Ordered interceptor chain terminated by a transport.
//!
//! A [`Pipeline`] owns its interceptors in registration order plus one [`Transport`]. Sending a
//! request hands it to the first interceptor together with a [`Next`] continuation covering the
//! rest of the chain; the last continuation calls the transport. Interceptors decide what to
//! forward but never own request lifecycle (timeouts, retries, cancellation stay with the
//! transport).

// self
use crate::{
	_prelude::*,
	obs::GateSpan,
	transport::{InboundResponse, OutboundRequest, Transport},
};

/// Boxed response future produced by interceptors and transports.
pub type PipelineFuture<'a> = Pin<Box<dyn Future<Output = Result<InboundResponse>> + 'a + Send>>;

/// A single stage of the request pipeline.
pub trait Interceptor
where
	Self: Send + Sync,
{
	/// Inspects or rewrites `request`, then forwards it through `next`.
	///
	/// Implementations usually return `next.run(..)` directly so the downstream response reaches
	/// the caller unchanged.
	fn intercept<'a>(&'a self, request: OutboundRequest, next: Next<'a>) -> PipelineFuture<'a>;
}

/// Continuation representing "send this request through the remaining pipeline".
#[derive(Clone, Copy)]
pub struct Next<'a> {
	interceptors: &'a [Arc<dyn Interceptor>],
	transport: &'a dyn Transport,
}
impl<'a> Next<'a> {
	/// Forwards `request` to the next interceptor, or to the transport if none remain.
	pub fn run(self, request: OutboundRequest) -> PipelineFuture<'a> {
		match self.interceptors.split_first() {
			Some((head, rest)) =>
				head.intercept(request, Next { interceptors: rest, transport: self.transport }),
			None => self.transport.send(request),
		}
	}

	/// Number of interceptors still ahead of the transport.
	pub fn remaining(&self) -> usize {
		self.interceptors.len()
	}
}
impl Debug for Next<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Next").field("remaining", &self.remaining()).finish_non_exhaustive()
	}
}

/// Interceptor chain plus the transport that terminates it.
#[derive(Clone)]
pub struct Pipeline {
	interceptors: Vec<Arc<dyn Interceptor>>,
	transport: Arc<dyn Transport>,
}
impl Pipeline {
	/// Creates a pipeline with no interceptors.
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self { interceptors: Vec::new(), transport }
	}

	/// Appends an interceptor; interceptors run in the order they are registered.
	pub fn with_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
		self.interceptors.push(interceptor);

		self
	}

	/// Number of registered interceptors.
	pub fn len(&self) -> usize {
		self.interceptors.len()
	}

	/// Returns `true` when requests go straight to the transport.
	pub fn is_empty(&self) -> bool {
		self.interceptors.is_empty()
	}

	/// Sends `request` through every interceptor and then the transport.
	pub fn send(&self, request: OutboundRequest) -> PipelineFuture<'_> {
		let next = Next { interceptors: &self.interceptors, transport: self.transport.as_ref() };
		let span = GateSpan::new("pipeline.send");

		Box::pin(span.instrument(next.run(request)))
	}
}
impl Debug for Pipeline {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Pipeline").field("interceptors", &self.interceptors.len()).finish()
	}
}
