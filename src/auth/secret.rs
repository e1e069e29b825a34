//! Session token wrapper: redacted formatting plus conversion into a credential header value.

// crates.io
use http::{HeaderValue, header::InvalidHeaderValue};
// self
use crate::_prelude::*;

/// Token issued by the identity provider and handed out by a session holder.
///
/// `Debug` and `Display` never print the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw token. Never log it.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Builds `"<scheme> <token>"` as a sensitive header value.
	///
	/// Fails when the token contains bytes a header value cannot carry (control characters).
	pub fn header_value(&self, scheme: &str) -> Result<HeaderValue, InvalidHeaderValue> {
		let mut value = HeaderValue::try_from(format!("{scheme} {}", self.0))?;

		value.set_sensitive(true);

		Ok(value)
	}

	/// Returns `true` when the wrapped token is the empty string.
	///
	/// Empty tokens count as "no token" everywhere a [`SessionHolder`](crate::auth::SessionHolder)
	/// is read.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
