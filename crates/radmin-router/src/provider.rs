//! The router configuration surface.

use crate::blocker::{RouterBlocker, ShouldBlock, use_blocker};
use crate::components::{link, navigate};
use crate::error::RouterError;
use crate::hooks::{self, NavigateFn, NavigateOptions};
use crate::location::{RouterLocation, To};
use crate::matcher::{Params, RouteMatch, RoutePattern, match_path};
use crate::routes::{RouteConfig, outlet, routes};
use crate::wrapper::router_wrapper;
use radmin_view::{Node, Scope, provide};
use std::fmt;
use std::rc::Rc;

/// Everything the rest of the admin needs from a router.
///
/// Implementations must agree on the input and output contracts of every
/// member so that components stay router-agnostic.
pub trait RouterProvider {
	fn use_navigate(&self, scope: &Scope) -> Result<NavigateFn, RouterError>;

	fn use_location(&self, scope: &Scope) -> Result<RouterLocation, RouterError>;

	fn use_params(&self, scope: &Scope) -> Params;

	fn use_blocker(&self, scope: &Scope, should_block: ShouldBlock) -> RouterBlocker;

	fn use_match(&self, scope: &Scope, pattern: RoutePattern) -> Result<Option<RouteMatch>, RouterError>;

	fn use_in_router_context(&self, scope: &Scope) -> bool;

	fn use_can_block(&self, scope: &Scope) -> bool;

	fn link(&self, to: To, children: Vec<Node>) -> Node;

	fn navigate(&self, to: To, options: NavigateOptions) -> Node;

	fn route(&self, config: RouteConfig) -> Node;

	fn routes(&self, children: Vec<Node>) -> Node;

	fn outlet(&self) -> Node;

	fn router_wrapper(&self, basename: Option<String>, children: Vec<Node>) -> Node;

	fn match_path(&self, pattern: RoutePattern, pathname: &str) -> Option<RouteMatch> {
		match_path(pattern, pathname)
	}
}

/// [`RouterProvider`] over this crate's host engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineRouterProvider;

impl RouterProvider for EngineRouterProvider {
	fn use_navigate(&self, scope: &Scope) -> Result<NavigateFn, RouterError> {
		hooks::use_navigate(scope)
	}

	fn use_location(&self, scope: &Scope) -> Result<RouterLocation, RouterError> {
		hooks::use_location(scope)
	}

	fn use_params(&self, scope: &Scope) -> Params {
		hooks::use_params(scope)
	}

	fn use_blocker(&self, scope: &Scope, should_block: ShouldBlock) -> RouterBlocker {
		use_blocker(scope, should_block)
	}

	fn use_match(&self, scope: &Scope, pattern: RoutePattern) -> Result<Option<RouteMatch>, RouterError> {
		hooks::use_match(scope, pattern)
	}

	fn use_in_router_context(&self, scope: &Scope) -> bool {
		hooks::use_in_router_context(scope)
	}

	fn use_can_block(&self, scope: &Scope) -> bool {
		hooks::use_can_block(scope)
	}

	fn link(&self, to: To, children: Vec<Node>) -> Node {
		link(to, children).into()
	}

	fn navigate(&self, to: To, options: NavigateOptions) -> Node {
		navigate(to, options.replace, options.state)
	}

	fn route(&self, config: RouteConfig) -> Node {
		config.to_node()
	}

	fn routes(&self, children: Vec<Node>) -> Node {
		routes(children)
	}

	fn outlet(&self) -> Node {
		outlet()
	}

	fn router_wrapper(&self, basename: Option<String>, children: Vec<Node>) -> Node {
		router_wrapper(basename, children)
	}
}

#[derive(Clone)]
struct ProviderHandle(Rc<dyn RouterProvider>);

/// Makes `provider` the router provider of the wrapped subtree.
pub fn router_provider_context(provider: Rc<dyn RouterProvider>, child: impl Into<Node>) -> Node {
	provide(ProviderHandle(provider), child)
}

/// The nearest router provider, the engine's by default.
pub fn use_router_provider(scope: &Scope) -> Rc<dyn RouterProvider> {
	match scope.context::<ProviderHandle>() {
		Some(ProviderHandle(provider)) => provider,
		None => Rc::new(EngineRouterProvider),
	}
}

impl fmt::Debug for ProviderHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("RouterProvider")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use radmin_view::{Props, Root};
	use rstest::rstest;

	struct Fixed;

	impl RouterProvider for Fixed {
		fn use_navigate(&self, _: &Scope) -> Result<NavigateFn, RouterError> {
			Err(RouterError::OutsideRouter)
		}
		fn use_location(&self, _: &Scope) -> Result<RouterLocation, RouterError> {
			Ok(RouterLocation::parse("/fixed"))
		}
		fn use_params(&self, _: &Scope) -> Params {
			Params::new()
		}
		fn use_blocker(&self, _: &Scope, _: ShouldBlock) -> RouterBlocker {
			RouterBlocker::Unblocked
		}
		fn use_match(&self, _: &Scope, _: RoutePattern) -> Result<Option<RouteMatch>, RouterError> {
			Ok(None)
		}
		fn use_in_router_context(&self, _: &Scope) -> bool {
			true
		}
		fn use_can_block(&self, _: &Scope) -> bool {
			false
		}
		fn link(&self, _: To, children: Vec<Node>) -> Node {
			Node::fragment(children)
		}
		fn navigate(&self, _: To, _: NavigateOptions) -> Node {
			Node::Empty
		}
		fn route(&self, _: RouteConfig) -> Node {
			Node::Empty
		}
		fn routes(&self, _: Vec<Node>) -> Node {
			Node::Empty
		}
		fn outlet(&self) -> Node {
			Node::Empty
		}
		fn router_wrapper(&self, _: Option<String>, children: Vec<Node>) -> Node {
			Node::fragment(children)
		}
	}

	fn location_probe() -> Node {
		Node::component("LocationProbe", Props::new(), |scope, _| {
			let provider = use_router_provider(scope);
			match provider.use_location(scope) {
				Ok(location) => Node::text(location.pathname),
				Err(err) => Node::text(err.to_string()),
			}
		})
	}

	#[rstest]
	fn test_default_provider_is_the_engine() {
		let root = Root::new(location_probe());

		assert_eq!(root.render_to_string(), RouterError::OutsideRouter.to_string());
	}

	#[rstest]
	fn test_context_overrides_provider() {
		let root = Root::new(router_provider_context(Rc::new(Fixed), location_probe()));

		assert_eq!(root.render_to_string(), "/fixed");
	}

	#[rstest]
	fn test_match_path_default_delegates_to_matcher() {
		let found = Fixed.match_path(RoutePattern::new("/posts/:id"), "/posts/7").unwrap();

		assert_eq!(found.params["id"], "7");
	}
}
