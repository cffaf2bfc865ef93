//! Adapter hooks: the router-agnostic view of the host engine.

use crate::basename::{Basename, use_basename};
use crate::engine::{EngineNavigate, EngineRouter, use_router};
use crate::error::RouterError;
use crate::location::{RouterLocation, To, append_search_and_hash};
use crate::matcher::{Params, RouteMatch, RoutePattern, match_path};
use crate::routes::use_routing_frame;
use radmin_view::Scope;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Options of a navigation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
	pub state: Option<Value>,
	pub replace: bool,
}

impl NavigateOptions {
	pub fn replace() -> Self {
		Self {
			replace: true,
			..Self::default()
		}
	}

	pub fn with_state(mut self, state: Value) -> Self {
		self.state = Some(state);
		self
	}
}

/// A navigate function, as returned by `use_navigate`.
#[derive(Clone)]
pub struct NavigateFn(Rc<dyn Fn(To, NavigateOptions)>);

impl NavigateFn {
	pub fn new(navigate: impl Fn(To, NavigateOptions) + 'static) -> Self {
		Self(Rc::new(navigate))
	}

	pub fn navigate(&self, to: impl Into<To>, options: NavigateOptions) {
		(self.0)(to.into(), options)
	}

	/// Navigates with default options.
	pub fn to(&self, to: impl Into<To>) {
		self.navigate(to, NavigateOptions::default())
	}
}

impl fmt::Debug for NavigateFn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("NavigateFn")
	}
}

fn require_router(scope: &Scope) -> Result<Rc<EngineRouter>, RouterError> {
	use_router(scope).ok_or(RouterError::OutsideRouter)
}

/// Whether a host router is mounted above.
pub fn use_in_router_context(scope: &Scope) -> bool {
	use_router(scope).is_some()
}

/// The engine always supports blocking.
pub fn use_can_block(_scope: &Scope) -> bool {
	true
}

/// The current location, with the basename stripped from the pathname.
pub fn use_location(scope: &Scope) -> Result<RouterLocation, RouterError> {
	let router = require_router(scope)?;
	let basename = use_basename(scope);
	let location = router.location();
	Ok(RouterLocation {
		pathname: basename.strip(&location.pathname).unwrap_or(location.pathname),
		search: location.search,
		hash: location.hash,
		state: location.state,
		key: String::new(),
	})
}

/// Returns a function navigating relative to the basename.
///
/// - a [`To::Delta`] moves through history,
/// - a [`To::Path`] is basename-resolved and handed to the engine,
/// - a [`To::Location`] keeps the current pathname when none is given, and is
///   pushed (or replaced) directly onto history with search and hash
///   appended once, so the query string is never re-encoded.
pub fn use_navigate(scope: &Scope) -> Result<NavigateFn, RouterError> {
	let router = require_router(scope)?;
	let basename = use_basename(scope);
	Ok(NavigateFn::new(move |to, options| {
		navigate_with(&router, &basename, to, options)
	}))
}

pub(crate) fn navigate_with(router: &EngineRouter, basename: &Basename, to: To, options: NavigateOptions) {
	match to {
		To::Delta(delta) => router.history().go(delta),
		To::Location(location) => {
			let pathname = location
				.pathname
				.unwrap_or_else(|| router.location().pathname);
			let mut url = basename.resolve(&pathname);
			append_search_and_hash(&mut url, location.search.as_deref(), location.hash.as_deref());
			let state = location
				.state
				.filter(|state| !state.is_null())
				.or(options.state)
				.unwrap_or(Value::Null);
			if options.replace {
				router.history().replace(&url, state);
			} else {
				router.history().push(&url, state);
			}
		}
		To::Path(path) => router.navigate(EngineNavigate {
			to: basename.resolve(&path),
			state: options.state,
			replace: options.replace,
		}),
	}
}

/// Params of the declarative routes matched so far, layered over the host
/// engine's native params. Declarative params win on collisions.
pub fn use_params(scope: &Scope) -> Params {
	let frame = use_routing_frame(scope);
	let mut params: Params = use_router(scope)
		.map(|router| {
			router
				.matches()
				.into_iter()
				.flat_map(|found| found.params)
				.collect()
		})
		.unwrap_or_default();
	params.extend(frame.params.iter().map(|(key, value)| (key.clone(), value.clone())));
	params
}

/// Matches `pattern` against the basename-relative current pathname.
pub fn use_match(scope: &Scope, pattern: impl Into<RoutePattern>) -> Result<Option<RouteMatch>, RouterError> {
	let location = use_location(scope)?;
	Ok(match_path(pattern, &location.pathname))
}
