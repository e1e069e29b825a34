//! Request/response value types and the transports that terminate a [`Pipeline`].
//!
//! [`Transport`] is the pipeline's only dependency on an HTTP stack. The crate ships
//! [`ReqwestTransport`] behind the default `reqwest` feature; anything else (a test double, a
//! bespoke SDK) only needs to turn an [`OutboundRequest`] into an [`InboundResponse`].
//!
//! [`Pipeline`]: crate::pipeline::Pipeline

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};
use crate::{_prelude::*, pipeline::PipelineFuture};

/// Outbound request descriptor passed along the pipeline.
pub type OutboundRequest = http::Request<Vec<u8>>;
/// Response produced by a transport and handed back through the pipeline untouched.
pub type InboundResponse = http::Response<Vec<u8>>;

/// Terminal pipeline stage that puts a request on the wire.
///
/// Implementations own timeouts, retries, and cancellation. Non-2xx responses are successful
/// sends; only failures to obtain a response are errors.
pub trait Transport
where
	Self: Send + Sync,
{
	/// Sends `request` and resolves to the full response.
	fn send(&self, request: OutboundRequest) -> PipelineFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client with the provided request timeout.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self> {
		let client = ReqwestClient::builder().timeout(timeout).build().map_err(ConfigError::from)?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn send(&self, request: OutboundRequest) -> PipelineFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let request = reqwest::Request::try_from(request).map_err(ConfigError::http_request)?;
			let response = client.execute(request).await.map_err(TransportError::from)?;
			let status = response.status();
			let version = response.version();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(TransportError::from)?;
			let mut inbound = InboundResponse::new(body.to_vec());

			*inbound.status_mut() = status;
			*inbound.version_mut() = version;
			*inbound.headers_mut() = headers;

			Ok(inbound)
		})
	}
}
