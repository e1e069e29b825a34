//! Crate-level error types shared by the configuration, pipeline, and transport layers.
//!
//! The gate itself never fails: a missing or unusable token is a [`GateDecision`], not an error.
//! Everything here is raised either while building a gate or while a transport sends a request.
//!
//! [`GateDecision`]: crate::gate::GateDecision

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Outbound request could not be converted for the transport.
	#[error("Outbound request could not be converted for the transport.")]
	HttpRequest {
		/// Underlying conversion failure.
		#[source]
		source: BoxError,
	},
	/// Gate configuration JSON could not be parsed.
	#[error("Gate configuration is malformed.")]
	Parse {
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},

	/// Authorization scheme is empty or contains whitespace.
	#[error("Authorization scheme `{scheme}` must be a single non-empty token.")]
	InvalidScheme {
		/// Scheme that failed validation.
		scheme: String,
	},
	/// Header name is not a valid HTTP header name.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Header name that failed validation.
		name: String,
	},
	/// API origin is not an absolute http(s) URL with a host.
	#[error("API origin must be an absolute http(s) URL with a host: {url}.")]
	InvalidOrigin {
		/// Origin URL that failed validation.
		url: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a request conversion failure inside [`ConfigError`].
	pub fn http_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpRequest { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(source: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Parse { source }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while sending the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while sending the request.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
