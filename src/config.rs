//! Gate configuration: authorization scheme, header name, and which requests get a token.

// crates.io
use http::HeaderName;
// self
use crate::{_prelude::*, error::ConfigError};

/// Scheme prefix written in front of the token.
pub const DEFAULT_SCHEME: &str = "Bearer";
/// Header that carries the credential.
pub const DEFAULT_HEADER: &str = "authorization";

/// Which outbound requests are eligible for the credential.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AttachScope {
	/// Every request receives the credential.
	#[default]
	All,
	/// Only requests whose absolute URI shares an origin with one of these URLs.
	///
	/// Relative (origin-form) URIs target the application's own API and always qualify.
	/// Authority-form URIs (`host:port`, as in `CONNECT`) never do.
	Origins {
		/// Allowed API origins; any path component is ignored.
		origins: Vec<Url>,
	},
}
impl AttachScope {
	/// Returns `true` if a request to `uri` may carry the credential.
	pub fn admits(&self, uri: &http::Uri) -> bool {
		let origins = match self {
			Self::All => return true,
			Self::Origins { origins } => origins,
		};

		match (uri.scheme(), uri.authority()) {
			(_, None) => return true,
			(None, Some(_)) => return false,
			_ => {},
		}

		match Url::parse(&uri.to_string()) {
			Ok(target) => {
				let target = target.origin();

				origins.iter().any(|allowed| allowed.origin() == target)
			},
			Err(_) => false,
		}
	}
}

/// Serializable gate configuration.
///
/// All fields default, so an empty JSON object yields the standard
/// `Authorization: Bearer <token>` behaviour on every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
	/// Authorization scheme placed before the token.
	pub scheme: String,
	/// Header name the credential is written to.
	pub header: String,
	/// Requests eligible for the credential.
	pub scope: AttachScope,
}
impl GateConfig {
	/// Parses a configuration document, reporting the failing field path on error.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);
		let config: Self = serde_path_to_error::deserialize(&mut de)?;

		config.validate()?;

		Ok(config)
	}

	/// Overrides the authorization scheme.
	pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
		self.scheme = scheme.into();

		self
	}

	/// Overrides the header name.
	pub fn header(mut self, header: impl Into<String>) -> Self {
		self.header = header.into();

		self
	}

	/// Restricts the credential to the provided API origins.
	pub fn restrict_to_origins<I>(mut self, origins: I) -> Self
	where
		I: IntoIterator<Item = Url>,
	{
		self.scope = AttachScope::Origins { origins: origins.into_iter().collect() };

		self
	}

	/// Checks every field and returns the parsed header name.
	pub fn validate(&self) -> Result<HeaderName, ConfigError> {
		if self.scheme.is_empty() || self.scheme.chars().any(|c| c.is_whitespace() || c.is_control())
		{
			return Err(ConfigError::InvalidScheme { scheme: self.scheme.clone() });
		}

		let header = HeaderName::from_bytes(self.header.as_bytes())
			.map_err(|_| ConfigError::InvalidHeaderName { name: self.header.clone() })?;

		if let AttachScope::Origins { origins } = &self.scope {
			for origin in origins {
				if !matches!(origin.scheme(), "http" | "https") || origin.host_str().is_none() {
					return Err(ConfigError::InvalidOrigin { url: origin.to_string() });
				}
			}
		}

		Ok(header)
	}
}
impl Default for GateConfig {
	fn default() -> Self {
		Self {
			scheme: DEFAULT_SCHEME.into(),
			header: DEFAULT_HEADER.into(),
			scope: AttachScope::All,
		}
	}
}
