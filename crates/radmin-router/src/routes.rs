//! Declarative routes: `Routes`, `Route` and `Outlet`.
//!
//! `Routes` reads its route children structurally at render time, matches
//! them against the part of the pathname its ancestors have not consumed yet,
//! and renders the winner inside a fresh [`RoutingFrame`]. Nested `Routes`
//! compose because each one strips the matched path of the frame above it.

use crate::basename::use_basename;
use crate::engine::{native_outlet, use_router};
use crate::matcher::{Params, match_path};
use radmin_view::{Element, Node, Props, Scope, provide, provide_keyed};
use std::rc::Rc;

/// A route extracted from a `Route`-shaped element.
#[derive(Debug, Clone, Default)]
pub struct RouteConfig {
	pub path: Option<String>,
	pub element: Option<Node>,
	pub index: bool,
	pub children: Option<Vec<RouteConfig>>,
}

impl RouteConfig {
	pub fn new(path: impl Into<String>, element: impl Into<Node>) -> Self {
		Self {
			path: Some(path.into()),
			element: Some(element.into()),
			..Self::default()
		}
	}

	pub fn index(element: impl Into<Node>) -> Self {
		Self {
			element: Some(element.into()),
			index: true,
			..Self::default()
		}
	}

	pub fn child(mut self, child: RouteConfig) -> Self {
		self.children.get_or_insert_with(Vec::new).push(child);
		self
	}

	/// Turns the config back into a `Route` element.
	pub fn to_node(&self) -> Node {
		let mut props = Props::new();
		props.path = self.path.clone();
		props.index = self.index.then_some(true);
		props.element = self.element.clone().map(Box::new);
		if let Some(children) = &self.children {
			props.children = children.iter().map(RouteConfig::to_node).collect();
		}
		route_element(props).into()
	}
}

/// The routing state established by the nearest matched route.
///
/// Frames are immutable: a nested match builds a new frame instead of
/// touching its parent's.
#[derive(Debug, Clone, Default)]
pub struct RoutingFrame {
	/// Cumulative pathname matched by all enclosing `Routes`, basename
	/// excluded. Empty above the outermost `Routes`.
	pub matched_path: String,
	/// Params of every enclosing match, deeper levels winning.
	pub params: Rc<Params>,
	/// Children of the matched route, rendered by `Outlet`.
	pub route_children: Option<Rc<Vec<RouteConfig>>>,
}

pub fn use_routing_frame(scope: &Scope) -> RoutingFrame {
	scope.context::<RoutingFrame>().unwrap_or_default()
}

fn route_element(props: Props) -> Element {
	Element::component("Route", props, |_, _| Node::Empty)
}

/// A route at `path`. Chain `.child(..)` for nested routes rendered by
/// [`outlet`]. Renders nothing by itself.
pub fn route(path: impl Into<String>, element: impl Into<Node>) -> Element {
	route_element(Props::new().path(path).element(element))
}

/// A route matching exactly the parent's path.
pub fn index_route(element: impl Into<Node>) -> Element {
	route_element(Props::new().index(true).element(element))
}

/// Pathname override for [`routes_at`].
#[derive(Debug, Clone)]
struct RoutesLocation(String);

/// Matches `children` against the current location.
pub fn routes(children: impl IntoIterator<Item = Node>) -> Node {
	Node::component("Routes", Props::new().children(children), render_routes)
}

/// Matches `children` against `pathname` instead of the current location.
pub fn routes_at(pathname: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Node {
	let props = Props::new()
		.children(children)
		.with_data(RoutesLocation(pathname.into()));
	Node::component("Routes", props, render_routes)
}

/// Structural route detection: fragments are flattened, and any element
/// carrying `path`, `index` or `element` counts as a route whatever its
/// component name.
pub fn extract_routes(nodes: &[Node]) -> Vec<RouteConfig> {
	let mut routes = Vec::new();
	collect_routes(nodes, &mut routes);
	routes
}

fn collect_routes(nodes: &[Node], out: &mut Vec<RouteConfig>) {
	for node in nodes {
		match node {
			Node::Fragment(children) => collect_routes(children, out),
			Node::Element(element) if element.props().is_route_like() => {
				let props = element.props();
				out.push(RouteConfig {
					path: props.path.clone(),
					element: props.element.as_deref().cloned(),
					index: props.index.unwrap_or(false),
					children: (!props.children.is_empty()).then(|| extract_routes(&props.children)),
				});
			}
			_ => {}
		}
	}
}

/// Outcome of matching one level of routes.
#[derive(Debug, Clone)]
pub struct FoundRoute {
	/// Position of the winner among the extracted routes.
	pub position: usize,
	pub matched_path: String,
	pub params: Params,
}

/// Picks the route to render for `pathname`, the part of the location left
/// after stripping `parent_matched`.
///
/// Routes are tried in declaration order and the first match wins. An index
/// route matches an empty remainder. A `*` route matches anything and keeps
/// the parent's matched path, so `Routes` nested under it see the whole
/// remainder.
pub fn find_match(routes: &[RouteConfig], pathname: &str, parent_matched: &str) -> Option<FoundRoute> {
	for (position, route) in routes.iter().enumerate() {
		if route.index && (pathname == "/" || pathname.is_empty()) {
			let matched_path = if parent_matched.is_empty() { "/" } else { parent_matched };
			return Some(FoundRoute {
				position,
				matched_path: matched_path.to_owned(),
				params: Params::new(),
			});
		}
		let path = route.path.as_deref().unwrap_or("");
		if let Some(found) = match_path(path, pathname) {
			let portion = if found.pathname_base.is_empty() { "/" } else { found.pathname_base.as_str() };
			let matched_path = if parent_matched.is_empty() || parent_matched == "/" {
				portion.to_owned()
			} else if portion == "/" {
				parent_matched.to_owned()
			} else {
				format!("{parent_matched}{portion}")
			};
			return Some(FoundRoute {
				position,
				matched_path,
				params: found.params,
			});
		}
	}
	None
}

/// What remains of `full` once the ancestors' matched path is consumed.
fn remaining_pathname(full: &str, parent_matched: &str) -> String {
	if parent_matched.is_empty() || parent_matched == "/" {
		return full.to_owned();
	}
	match full.strip_prefix(parent_matched) {
		Some("") => "/".to_owned(),
		Some(rest) if rest.starts_with('/') => rest.to_owned(),
		_ => full.to_owned(),
	}
}

fn render_routes(scope: &Scope, props: &Props) -> Node {
	let basename = use_basename(scope);
	let frame = use_routing_frame(scope);
	let raw = match props.data::<RoutesLocation>() {
		Some(RoutesLocation(pathname)) => Some(pathname.clone()),
		None => use_router(scope).map(|router| router.location().pathname),
	};
	let Some(raw) = raw else {
		tracing::error!("Routes rendered outside a router and without a location");
		return Node::Empty;
	};
	let Some(full_pathname) = basename.strip(&raw) else {
		tracing::trace!(pathname = %raw, basename = basename.as_str(), "outside the basename");
		return Node::Empty;
	};
	let pathname = remaining_pathname(&full_pathname, &frame.matched_path);
	let routes = extract_routes(&props.children);
	let Some(found) = find_match(&routes, &pathname, &frame.matched_path) else {
		return Node::Empty;
	};

	let mut params = (*frame.params).clone();
	params.extend(found.params);
	let route = &routes[found.position];
	let next = RoutingFrame {
		matched_path: found.matched_path,
		params: Rc::new(params),
		route_children: route.children.clone().map(Rc::new),
	};
	provide_keyed(
		format!("route-{}", found.position),
		next,
		route.element.clone().unwrap_or_default(),
	)
}

/// Renders the children of the matched route, or the host engine's native
/// outlet when the matched route declared none.
pub fn outlet() -> Node {
	Node::component("Outlet", Props::new(), |scope, _| {
		let frame = use_routing_frame(scope);
		match frame.route_children.as_deref() {
			Some(children) if !children.is_empty() => {
				let nested = routes(children.iter().map(RouteConfig::to_node));
				provide(
					RoutingFrame {
						route_children: None,
						..frame.clone()
					},
					nested,
				)
			}
			_ => native_outlet(),
		}
	})
}
