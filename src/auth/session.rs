//! Session holder contract and the process-wide shared implementation.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Read-only view of the current authentication state.
///
/// The identity-provider client owns the session lifecycle (login, refresh, expiry, logout);
/// consumers such as [`AuthGate`](crate::gate::AuthGate) only read it. Implementations must
/// return the state as of the call: callers rely on reading a fresh value on every request
/// and never cache it themselves.
pub trait SessionHolder
where
	Self: Send + Sync,
{
	/// Returns the current bearer token, or `None` when no session is established.
	fn token(&self) -> Option<TokenSecret>;
}
impl<T> SessionHolder for Arc<T>
where
	T: ?Sized + SessionHolder,
{
	fn token(&self) -> Option<TokenSecret> {
		(**self).token()
	}
}
impl<T> SessionHolder for &T
where
	T: ?Sized + SessionHolder,
{
	fn token(&self) -> Option<TokenSecret> {
		(**self).token()
	}
}

/// Cloneable handle over a process-wide session slot.
///
/// Every clone shares the same slot, so the identity-provider client can keep one handle to
/// write into while the gate and route guards hold others. A freshly created session is
/// uninitialized and reports no token.
#[derive(Clone, Debug, Default)]
pub struct SharedSession(Arc<RwLock<Option<TokenSecret>>>);
impl SharedSession {
	/// Creates an uninitialized session with no token.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a session already holding `token`.
	pub fn with_token(token: impl Into<TokenSecret>) -> Self {
		Self(Arc::new(RwLock::new(Some(token.into()))))
	}

	/// Installs a new token (login or refresh), returning the previous one.
	pub fn replace(&self, token: impl Into<TokenSecret>) -> Option<TokenSecret> {
		self.0.write().replace(token.into())
	}

	/// Drops the current token (logout or invalidation), returning it.
	pub fn clear(&self) -> Option<TokenSecret> {
		self.0.write().take()
	}

	/// Returns `true` when a non-empty token is present.
	pub fn is_authenticated(&self) -> bool {
		self.0.read().as_ref().is_some_and(|token| !token.is_empty())
	}
}
impl SessionHolder for SharedSession {
	fn token(&self) -> Option<TokenSecret> {
		self.0.read().clone()
	}
}
