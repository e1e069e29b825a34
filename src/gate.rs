//! The authenticated request gate.
//!
//! [`AuthGate`] reads the current token from a [`SessionHolder`] on every request and, when
//! one is available, forwards a copy of the request carrying `Authorization: Bearer <token>`.
//! Without a token the request passes through untouched. The gate never fails, never caches the
//! token, and never looks at the response.

// crates.io
use http::{HeaderName, HeaderValue, Request, Uri, header::AUTHORIZATION};
// self
use crate::{
	_prelude::*,
	auth::SessionHolder,
	config::{AttachScope, DEFAULT_SCHEME, GateConfig},
	obs::{self, GateSpan},
	pipeline::{Interceptor, Next, PipelineFuture},
	transport::OutboundRequest,
};

/// Outcome of a single gate evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateDecision {
	/// Credential header was added.
	Attached,
	/// Session holder had no token, or an empty one.
	NoToken,
	/// Request targets an origin outside the configured scope.
	OutOfScope,
	/// Token contains bytes that cannot appear in a header value.
	UnencodableToken,
}
impl GateDecision {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			GateDecision::Attached => "attached",
			GateDecision::NoToken => "no_token",
			GateDecision::OutOfScope => "out_of_scope",
			GateDecision::UnencodableToken => "unencodable_token",
		}
	}

	/// Returns `true` if the forwarded request carries the credential.
	pub const fn is_attached(self) -> bool {
		matches!(self, GateDecision::Attached)
	}
}
impl Display for GateDecision {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Interceptor that attaches the session's bearer token to outbound requests.
///
/// The session holder is injected at construction and shared; the gate only ever reads it.
pub struct AuthGate<S = dyn SessionHolder>
where
	S: ?Sized + SessionHolder,
{
	session: Arc<S>,
	scheme: String,
	header: HeaderName,
	scope: AttachScope,
}
impl<S> AuthGate<S>
where
	S: ?Sized + SessionHolder,
{
	/// Creates a gate writing `Authorization: Bearer <token>` on every request.
	pub fn new(session: Arc<S>) -> Self {
		Self {
			session,
			scheme: DEFAULT_SCHEME.into(),
			header: AUTHORIZATION,
			scope: AttachScope::All,
		}
	}

	/// Creates a gate from a validated [`GateConfig`].
	pub fn with_config(session: Arc<S>, config: GateConfig) -> Result<Self> {
		let header = config.validate()?;

		Ok(Self { session, scheme: config.scheme, header, scope: config.scope })
	}

	/// Returns the injected session holder.
	pub fn session(&self) -> &Arc<S> {
		&self.session
	}

	/// Evaluates the gate for `request`, returning the request to forward and the decision.
	///
	/// On [`GateDecision::Attached`] the request is rebuilt from its parts with the credential
	/// header inserted, replacing any value the caller set under the same name. Every other
	/// header, the method, URI, version, extensions, and body carry over unchanged. For any other
	/// decision the original request is returned as-is.
	pub fn decide<B>(&self, request: Request<B>) -> (Request<B>, GateDecision) {
		let span = GateSpan::new("decide");
		let (request, decision) = span.in_scope(|| match self.credential(request.uri()) {
			Ok(value) => {
				let (mut parts, body) = request.into_parts();

				parts.headers.insert(self.header.clone(), value);

				(Request::from_parts(parts, body), GateDecision::Attached)
			},
			Err(decision) => {
				obs::log_decision(decision, request.method());

				(request, decision)
			},
		});

		span.record_decision(decision);
		obs::record_decision(decision);

		(request, decision)
	}

	/// Convenience wrapper around [`decide`](Self::decide) that drops the decision.
	pub fn authorize<B>(&self, request: Request<B>) -> Request<B> {
		self.decide(request).0
	}

	fn credential(&self, uri: &Uri) -> Result<HeaderValue, GateDecision> {
		let token =
			self.session.token().filter(|token| !token.is_empty()).ok_or(GateDecision::NoToken)?;

		if !self.scope.admits(uri) {
			return Err(GateDecision::OutOfScope);
		}

		token.header_value(&self.scheme).map_err(|_| GateDecision::UnencodableToken)
	}
}
impl<S> Clone for AuthGate<S>
where
	S: ?Sized + SessionHolder,
{
	fn clone(&self) -> Self {
		Self {
			session: Arc::clone(&self.session),
			scheme: self.scheme.clone(),
			header: self.header.clone(),
			scope: self.scope.clone(),
		}
	}
}
impl<S> Debug for AuthGate<S>
where
	S: ?Sized + SessionHolder,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthGate")
			.field("scheme", &self.scheme)
			.field("header", &self.header)
			.field("scope", &self.scope)
			.finish_non_exhaustive()
	}
}
impl<S> Interceptor for AuthGate<S>
where
	S: ?Sized + SessionHolder,
{
	fn intercept<'a>(&'a self, request: OutboundRequest, next: Next<'a>) -> PipelineFuture<'a> {
		next.run(self.authorize(request))
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::{HeaderMap, Method};
	// self
	use super::*;
	use crate::{
		auth::{SharedSession, TokenSecret},
		error::{ConfigError, Error},
	};

	fn gate(session: &SharedSession) -> AuthGate<SharedSession> {
		AuthGate::new(Arc::new(session.clone()))
	}

	fn request(headers: &[(&str, &str)]) -> Request<()> {
		let mut builder = Request::builder().method(Method::GET).uri("https://api.example.com/games");

		for (name, value) in headers {
			builder = builder.header(*name, *value);
		}

		builder.body(()).expect("Request fixture should build.")
	}

	fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
		let mut pairs = headers
			.iter()
			.map(|(name, value)| {
				(
					name.as_str().to_owned(),
					value.to_str().expect("Header fixture should be ASCII.").to_owned(),
				)
			})
			.collect::<Vec<_>>();

		pairs.sort();

		pairs
	}

	#[test]
	fn token_present_adds_bearer_header() {
		let session = SharedSession::with_token("abc123");
		let (forwarded, decision) = gate(&session).decide(request(&[]));

		assert_eq!(decision, GateDecision::Attached);
		assert_eq!(
			header_pairs(forwarded.headers()),
			vec![("authorization".to_owned(), "Bearer abc123".to_owned())]
		);
	}

	#[test]
	fn token_absent_forwards_unchanged() {
		let session = SharedSession::new();
		let (forwarded, decision) = gate(&session).decide(request(&[("x-test", "1")]));

		assert_eq!(decision, GateDecision::NoToken);
		assert_eq!(header_pairs(forwarded.headers()), vec![("x-test".to_owned(), "1".to_owned())]);
	}

	#[test]
	fn empty_token_counts_as_absent() {
		let session = SharedSession::with_token("");
		let (forwarded, decision) = gate(&session).decide(request(&[("x-test", "1")]));

		assert_eq!(decision, GateDecision::NoToken);
		assert!(forwarded.headers().get(AUTHORIZATION).is_none());
	}

	#[test]
	fn caller_authorization_is_replaced() {
		let session = SharedSession::with_token("abc123");
		let forwarded =
			gate(&session).authorize(request(&[("authorization", "Basic Zm9vOmJhcg=="), ("x-test", "1")]));
		let values = forwarded.headers().get_all(AUTHORIZATION).iter().collect::<Vec<_>>();

		assert_eq!(values, vec!["Bearer abc123"]);
		assert_eq!(forwarded.headers().get("x-test").map(|v| v.as_bytes()), Some(&b"1"[..]));
	}

	#[test]
	fn repeated_interception_never_duplicates() {
		let session = SharedSession::with_token("abc123");
		let gate = gate(&session);
		let once = gate.authorize(request(&[("x-test", "1")]));
		let twice = gate.authorize(once);

		assert_eq!(twice.headers().len(), 2);
		assert_eq!(twice.headers().get_all(AUTHORIZATION).iter().count(), 1);
	}

	#[test]
	fn token_is_read_fresh_every_time() {
		let session = SharedSession::new();
		let gate = gate(&session);

		assert_eq!(gate.decide(request(&[])).1, GateDecision::NoToken);

		session.replace("first");

		assert_eq!(
			gate.authorize(request(&[])).headers().get(AUTHORIZATION).map(|v| v.as_bytes()),
			Some(&b"Bearer first"[..])
		);

		session.replace("second");

		assert_eq!(
			gate.authorize(request(&[])).headers().get(AUTHORIZATION).map(|v| v.as_bytes()),
			Some(&b"Bearer second"[..])
		);

		session.clear();

		assert_eq!(gate.decide(request(&[])).1, GateDecision::NoToken);
	}

	#[test]
	fn unencodable_token_forwards_unchanged() {
		let session = SharedSession::with_token(TokenSecret::new("abc\n123"));
		let (forwarded, decision) = gate(&session).decide(request(&[]));

		assert_eq!(decision, GateDecision::UnencodableToken);
		assert!(forwarded.headers().is_empty());
	}

	#[test]
	fn attached_header_is_sensitive() {
		let session = SharedSession::with_token("abc123");
		let forwarded = gate(&session).authorize(request(&[]));
		let value = forwarded.headers().get(AUTHORIZATION).expect("Header should be attached.");

		assert!(value.is_sensitive());
		assert!(!format!("{:?}", forwarded.headers()).contains("abc123"));
	}

	#[test]
	fn request_parts_survive_attachment() {
		let session = SharedSession::with_token("abc123");
		let original = Request::builder()
			.method(Method::POST)
			.uri("/api/games?page=2")
			.header("content-type", "application/json")
			.body(b"{\"title\":\"Catan\"}".to_vec())
			.expect("Request fixture should build.");
		let forwarded = gate(&session).authorize(original);

		assert_eq!(forwarded.method(), Method::POST);
		assert_eq!(forwarded.uri(), "/api/games?page=2");
		assert_eq!(forwarded.body(), b"{\"title\":\"Catan\"}");
		assert_eq!(forwarded.headers().len(), 2);
	}

	#[test]
	fn configured_scope_skips_foreign_origins() {
		let session = SharedSession::with_token("abc123");
		let config = GateConfig::default().restrict_to_origins([
			Url::parse("https://api.example.com").expect("Origin fixture should parse."),
		]);
		let gate = AuthGate::with_config(Arc::new(session), config)
			.expect("Scoped config should validate.");
		let foreign = Request::get("https://cdn.example.org/cover.png")
			.body(())
			.expect("Request fixture should build.");

		assert_eq!(gate.decide(foreign).1, GateDecision::OutOfScope);
		assert_eq!(gate.decide(request(&[])).1, GateDecision::Attached);
	}

	#[test]
	fn connect_targets_outside_scope_stay_unsigned() {
		let session = SharedSession::with_token("abc123");
		let config = GateConfig::default().restrict_to_origins([
			Url::parse("https://api.example.com").expect("Origin fixture should parse."),
		]);
		let gate = AuthGate::with_config(Arc::new(session), config)
			.expect("Scoped config should validate.");
		let tunnel = Request::builder()
			.method(Method::CONNECT)
			.uri("evil.example.net:443")
			.body(())
			.expect("Request fixture should build.");
		let (forwarded, decision) = gate.decide(tunnel);

		assert_eq!(decision, GateDecision::OutOfScope);
		assert!(forwarded.headers().get(AUTHORIZATION).is_none());
	}

	#[test]
	fn configured_scheme_and_header_are_used() {
		let session = SharedSession::with_token("abc123");
		let config = GateConfig::default().scheme("Token").header("x-api-token");
		let forwarded = AuthGate::with_config(Arc::new(session), config)
			.expect("Custom config should validate.")
			.authorize(request(&[]));

		assert!(forwarded.headers().get(AUTHORIZATION).is_none());
		assert_eq!(
			forwarded.headers().get("x-api-token").map(|v| v.as_bytes()),
			Some(&b"Token abc123"[..])
		);
	}

	#[test]
	fn invalid_config_is_rejected() {
		let err = AuthGate::with_config(
			Arc::new(SharedSession::new()),
			GateConfig::default().scheme("two words"),
		)
		.expect_err("Whitespace in the scheme should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidScheme { .. })));
	}

	#[test]
	fn dyn_session_holder_is_accepted() {
		let session: Arc<dyn SessionHolder> = Arc::new(SharedSession::with_token("abc123"));
		let gate: AuthGate = AuthGate::new(session);

		assert!(gate.decide(request(&[])).1.is_attached());
		assert!(format!("{gate:?}").starts_with("AuthGate"));
	}
}
