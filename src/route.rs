//! Navigation table for the catalog client and the session guard in front of it.
//!
//! Patterns are `/`-separated with `:name` placeholders (`/games/manage/:gameId`). Literal routes
//! take precedence over parameterized ones, so `/games/manage` never reaches the `:gameId`
//! pattern. Guarded routes require a non-empty token in the [`SessionHolder`]; without one,
//! navigation redirects to [`LOGIN_PATH`].

// self
use crate::{_prelude::*, auth::SessionHolder, obs::GateSpan};

/// Where unauthenticated visitors of guarded routes are sent.
pub const LOGIN_PATH: &str = "/login";

/// Page components the client can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
	/// Sign-in page.
	Login,
	/// Account registration form.
	Register,
	/// Activation code entry after registration.
	ActivateAccount,
	/// Shareable game catalog.
	GameList,
	/// Games owned by the signed-in user.
	MyGames,
	/// Games the signed-in user has borrowed.
	BorrowedGameList,
	/// Create or edit a game.
	ManageGame,
}

/// A single pattern → view mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
	/// Path pattern, `:name` segments capture parameters.
	pub pattern: String,
	/// View rendered when the pattern matches.
	pub view: View,
	/// Whether the route requires an authenticated session.
	#[serde(default)]
	pub guarded: bool,
}
impl Route {
	/// Public route.
	pub fn open(pattern: impl Into<String>, view: View) -> Self {
		Self { pattern: pattern.into(), view, guarded: false }
	}

	/// Route that requires a session token.
	pub fn guarded(pattern: impl Into<String>, view: View) -> Self {
		Self { pattern: pattern.into(), view, guarded: true }
	}

	fn param_count(&self) -> usize {
		self.pattern.matches("/:").count()
	}

	fn segment_count(&self) -> usize {
		self.pattern.matches('/').count()
	}
}

/// Successful path resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
	/// Matched route.
	pub route: Route,
	/// Captured path parameters, e.g. `{"gameId": "42"}`.
	pub params: HashMap<String, String>,
}
impl RouteMatch {
	/// Returns the captured value for `name`.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}
}

/// Result of navigating to a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
	/// Render the matched view.
	Render(RouteMatch),
	/// Guarded route without a session; go to [`LOGIN_PATH`].
	RedirectToLogin {
		/// Normalized path the visitor asked for.
		from: String,
	},
	/// No route matches.
	NotFound,
}

/// Ordered route table.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
	routes: Vec<Route>,
}
impl RouteTable {
	/// Builds a table, ordering routes so the most specific pattern is tried first.
	pub fn new<I>(routes: I) -> Self
	where
		I: IntoIterator<Item = Route>,
	{
		let mut routes = routes.into_iter().collect::<Vec<_>>();

		routes.sort_by_key(|route| (route.param_count(), std::cmp::Reverse(route.segment_count())));

		Self { routes }
	}

	/// The catalog client's navigation table.
	pub fn application() -> Self {
		Self::new([
			Route::open("/login", View::Login),
			Route::open("/register", View::Register),
			Route::open("/activate-account", View::ActivateAccount),
			Route::guarded("/games", View::GameList),
			Route::guarded("/games/my-games", View::MyGames),
			Route::guarded("/games/my-borrowed-games", View::BorrowedGameList),
			Route::guarded("/games/manage", View::ManageGame),
			Route::guarded("/games/manage/:gameId", View::ManageGame),
		])
	}

	/// Registered routes in match order.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Matches `path` against the table, ignoring query, fragment, and trailing slashes.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		let path = normalize(path);

		self.routes.iter().find_map(|route| {
			match_pattern(&route.pattern, &path)
				.map(|params| RouteMatch { route: route.clone(), params })
		})
	}

	/// Resolves `path` and applies the session guard.
	pub fn navigate<S>(&self, path: &str, session: &S) -> Navigation
	where
		S: ?Sized + SessionHolder,
	{
		GateSpan::new("route.navigate").in_scope(|| {
			let Some(matched) = self.match_path(path) else {
				return Navigation::NotFound;
			};

			if matched.route.guarded && !session.token().is_some_and(|token| !token.is_empty()) {
				return Navigation::RedirectToLogin { from: normalize(path) };
			}

			Navigation::Render(matched)
		})
	}
}

fn normalize(path: &str) -> String {
	let path = path.split(['?', '#']).next().unwrap_or_default().trim_end_matches('/');

	if path.starts_with('/') { path.to_owned() } else { format!("/{path}") }
}

fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
	let pattern_parts = pattern.split('/').collect::<Vec<_>>();
	let path_parts = path.split('/').collect::<Vec<_>>();

	if pattern_parts.len() != path_parts.len() {
		return None;
	}

	let mut params = HashMap::new();

	for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
		if let Some(name) = pat.strip_prefix(':') {
			if actual.is_empty() {
				return None;
			}

			params.insert(name.to_owned(), (*actual).to_owned());
		} else if pat != actual {
			return None;
		}
	}

	Some(params)
}
