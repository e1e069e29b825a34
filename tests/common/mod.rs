//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
// self
use bearer_gate::{
	http::{HeaderMap, Method, Request, Response, Uri},
	pipeline::PipelineFuture,
	transport::{OutboundRequest, Transport},
};

/// Snapshot of a request as it reached the transport.
#[derive(Clone, Debug)]
pub struct SeenRequest {
	pub method: Method,
	pub uri: Uri,
	pub headers: HeaderMap,
	pub body: Vec<u8>,
}

/// Transport double that records every request and answers `200` with an empty body.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
	seen: Arc<Mutex<Vec<SeenRequest>>>,
}
impl RecordingTransport {
	pub fn seen(&self) -> Vec<SeenRequest> {
		self.seen.lock().clone()
	}

	pub fn last(&self) -> SeenRequest {
		self.seen.lock().last().cloned().expect("Transport should have received a request.")
	}
}
impl Transport for RecordingTransport {
	fn send(&self, request: OutboundRequest) -> PipelineFuture<'_> {
		let (parts, body) = request.into_parts();

		self.seen.lock().push(SeenRequest {
			method: parts.method,
			uri: parts.uri,
			headers: parts.headers,
			body,
		});

		Box::pin(async { Ok(Response::new(Vec::new())) })
	}
}

pub fn get(uri: &str) -> OutboundRequest {
	Request::get(uri).body(Vec::new()).expect("Request fixture should build.")
}

pub fn get_with(uri: &str, headers: &[(&str, &str)]) -> OutboundRequest {
	let mut builder = Request::get(uri);

	for (name, value) in headers {
		builder = builder.header(*name, *value);
	}

	builder.body(Vec::new()).expect("Request fixture should build.")
}
