//! The host routing engine.
//!
//! A configuration-first router: routes are declared up front as a
//! [`NativeRoute`] tree, and the engine renders the root node plus whatever
//! native routes match, through [`native_outlet`]. The adapter in this crate
//! runs on top of it, matching declarative routes itself at render time.

use crate::basename::Basename;
use crate::history::History;
use crate::location::{RouterLocation, split_href};
use crate::matcher::{Params, RoutePattern, match_path};
use radmin_view::{ByAddress, Cleanup, Node, Props, Scope, provide};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// A route of the engine's own route tree.
#[derive(Debug, Clone)]
pub struct NativeRoute {
	pub path: String,
	pub element: Node,
	pub children: Vec<NativeRoute>,
}

impl NativeRoute {
	pub fn new(path: impl Into<String>, element: impl Into<Node>) -> Self {
		Self {
			path: path.into(),
			element: element.into(),
			children: Vec::new(),
		}
	}

	pub fn child(mut self, child: NativeRoute) -> Self {
		self.children.push(child);
		self
	}
}

/// One level of the engine's matched route chain.
#[derive(Debug, Clone)]
pub struct NativeMatch {
	pub route_path: String,
	pub params: Params,
	pub element: Node,
}

/// A navigation request as the engine understands it.
#[derive(Debug, Clone, Default)]
pub struct EngineNavigate {
	pub to: String,
	pub state: Option<Value>,
	pub replace: bool,
}

/// The host router.
pub struct EngineRouter {
	history: Rc<History>,
	basepath: Basename,
	root: Node,
	routes: Vec<NativeRoute>,
}

impl EngineRouter {
	/// A router rendering `root` with no native routes.
	pub fn new(history: Rc<History>, root: impl Into<Node>) -> Self {
		Self {
			history,
			basepath: Basename::default(),
			root: root.into(),
			routes: Vec::new(),
		}
	}

	pub fn with_basepath(mut self, basepath: impl Into<Basename>) -> Self {
		self.basepath = basepath.into();
		self
	}

	pub fn with_routes(mut self, routes: Vec<NativeRoute>) -> Self {
		self.routes = routes;
		self
	}

	pub fn history(&self) -> &Rc<History> {
		&self.history
	}

	pub fn basepath(&self) -> &Basename {
		&self.basepath
	}

	pub fn root(&self) -> &Node {
		&self.root
	}

	/// The current location, basepath included.
	pub fn location(&self) -> RouterLocation {
		self.history.location()
	}

	/// The chain of native routes matching the current location.
	pub fn matches(&self) -> Vec<NativeMatch> {
		let mut matches = Vec::new();
		if let Some(pathname) = self.basepath.strip(&self.location().pathname) {
			collect_matches(&self.routes, &pathname, &mut matches);
		}
		matches
	}

	/// Navigates the way the engine's own `navigate` does: relative targets
	/// resolve against the current pathname and the query string goes
	/// through the engine's search serializer.
	pub fn navigate(&self, request: EngineNavigate) {
		let target = resolve_relative(&self.location().pathname, &request.to);
		let (pathname, search, hash) = split_href(&target);
		let url = format!("{pathname}{}{hash}", reserialize_search(&search));
		let state = request.state.unwrap_or(Value::Null);
		tracing::debug!(url = %url, replace = request.replace, "engine navigate");
		if request.replace {
			self.history.replace(&url, state);
		} else {
			self.history.push(&url, state);
		}
	}
}

impl fmt::Debug for EngineRouter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EngineRouter")
			.field("history", &self.history)
			.field("basepath", &self.basepath)
			.field("routes", &self.routes.len())
			.finish()
	}
}

fn collect_matches(routes: &[NativeRoute], pathname: &str, out: &mut Vec<NativeMatch>) -> bool {
	for route in routes {
		let pattern = RoutePattern::new(route.path.as_str()).end(route.children.is_empty());
		if let Some(found) = match_path(pattern, pathname) {
			out.push(NativeMatch {
				route_path: route.path.clone(),
				params: found.params,
				element: route.element.clone(),
			});
			if !route.children.is_empty() {
				let rest = remainder(pathname, &found.pathname_base);
				collect_matches(&route.children, &rest, out);
			}
			return true;
		}
	}
	false
}

fn remainder(pathname: &str, base: &str) -> String {
	if base == "/" {
		return pathname.to_owned();
	}
	match pathname.strip_prefix(base) {
		Some(rest) if rest.starts_with('/') => rest.to_owned(),
		_ => "/".to_owned(),
	}
}

/// Resolves `.`/`..` targets against `current`. Absolute targets pass through.
fn resolve_relative(current: &str, to: &str) -> String {
	if to.starts_with('/') {
		return to.to_owned();
	}
	let (path, search, hash) = split_href(to);
	let path = if to.starts_with('?') || to.starts_with('#') {
		""
	} else {
		path.as_str()
	};
	let mut segments: Vec<&str> = current.split('/').filter(|s| !s.is_empty()).collect();
	for segment in path.split('/').filter(|s| !s.is_empty()) {
		match segment {
			"." => {}
			".." => {
				segments.pop();
			}
			other => segments.push(other),
		}
	}
	format!("/{}{search}{hash}", segments.join("/"))
}

/// Decodes and re-encodes a query string, form style. This normalizes
/// escapes (`%20` becomes `+`), which is why callers needing bit-exact
/// queries write to history directly.
fn reserialize_search(search: &str) -> String {
	let raw = search.strip_prefix('?').unwrap_or(search);
	if raw.is_empty() {
		return String::new();
	}
	let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
		Ok(pairs) => pairs,
		Err(err) => {
			tracing::warn!(error = %err, search = raw, "unparseable query string kept verbatim");
			return format!("?{raw}");
		}
	};
	match serde_urlencoded::to_string(&pairs) {
		Ok(encoded) if encoded.is_empty() => String::new(),
		Ok(encoded) => format!("?{encoded}"),
		Err(err) => {
			tracing::warn!(error = %err, search = raw, "query string could not be re-encoded");
			format!("?{raw}")
		}
	}
}

/// Current depth of native outlets.
#[derive(Debug, Clone, Copy, Default)]
struct NativeDepth(usize);

/// Returns the nearest mounted host router.
pub fn use_router(scope: &Scope) -> Option<Rc<EngineRouter>> {
	scope.context::<Rc<EngineRouter>>()
}

/// Mounts a host router: makes it visible to descendants and renders its
/// root node. Location changes schedule a render pass.
pub fn router_root(router: Rc<EngineRouter>) -> Node {
	Node::component("RouterRoot", Props::new(), move |scope, _| {
		let history = Rc::clone(router.history());
		let invalidator = scope.invalidator();
		scope.use_effect(ByAddress(Rc::clone(&history)), move || {
			let listener = history.listen(move || invalidator.invalidate());
			Some(Box::new(move || history.unlisten(listener)) as Cleanup)
		});
		provide(
			Rc::clone(&router),
			provide(NativeDepth(0), router.root().clone()),
		)
	})
}

/// Renders the next level of the native match chain.
pub fn native_outlet() -> Node {
	Node::component("NativeOutlet", Props::new(), |scope, _| {
		let Some(router) = use_router(scope) else {
			return Node::Empty;
		};
		let NativeDepth(depth) = scope.context::<NativeDepth>().unwrap_or_default();
		match router.matches().into_iter().nth(depth) {
			Some(found) => provide(NativeDepth(depth + 1), found.element),
			None => Node::Empty,
		}
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use radmin_view::Root;
	use rstest::rstest;

	fn router_at(path: &str) -> EngineRouter {
		EngineRouter::new(History::memory_at(path), Node::Empty)
	}

	#[rstest]
	#[case("/posts", "edit", "/posts/edit")]
	#[case("/posts/1", "./edit", "/posts/1/edit")]
	#[case("/posts/1", "../comments", "/posts/comments")]
	#[case("/posts/1", "?page=2", "/posts/1?page=2")]
	#[case("/posts/1", "/abs", "/abs")]
	fn test_resolve_relative(#[case] current: &str, #[case] to: &str, #[case] expected: &str) {
		assert_eq!(resolve_relative(current, to), expected);
	}

	#[rstest]
	#[case("?q=a%20b", "?q=a+b")]
	#[case("?a=1&b=2", "?a=1&b=2")]
	#[case("", "")]
	#[case("?", "")]
	fn test_reserialize_search(#[case] search: &str, #[case] expected: &str) {
		assert_eq!(reserialize_search(search), expected);
	}

	#[rstest]
	fn test_navigate_pushes_and_replaces() {
		// Arrange
		let router = router_at("/");

		// Act
		router.navigate(EngineNavigate {
			to: "/posts?q=a%20b".into(),
			..Default::default()
		});
		router.navigate(EngineNavigate {
			to: "/comments".into(),
			state: Some(serde_json::json!({"x": 1})),
			replace: true,
		});

		// Assert
		let history = router.history();
		assert_eq!(history.len(), 2);
		assert_eq!(history.location().pathname, "/comments");
		assert_eq!(history.location().state, serde_json::json!({"x": 1}));
		history.back();
		assert_eq!(history.location().search, "");
	}

	#[rstest]
	fn test_native_matches_chain() {
		// Arrange
		let router = router_at("/app/tenant/7/admin").with_basepath("/app").with_routes(vec![
			NativeRoute::new("/tenant/:tenant_id", "tenant")
				.child(NativeRoute::new("admin/*", "admin")),
			NativeRoute::new("/other", "other"),
		]);

		// Act
		let matches = router.matches();

		// Assert
		assert_eq!(matches.len(), 2);
		assert_eq!(matches[0].params["tenant_id"], "7");
		assert_eq!(matches[1].route_path, "admin/*");
	}

	#[rstest]
	fn test_matches_outside_basepath_are_empty() {
		let router = router_at("/elsewhere").with_basepath("/app").with_routes(vec![NativeRoute::new("/*", "all")]);
		assert!(router.matches().is_empty());
	}

	#[rstest]
	fn test_native_outlets_render_nested_matches() {
		// Arrange
		let history = History::memory_at("/a/b");
		let root = radmin_view::Element::tag("main").child(native_outlet());
		let router = EngineRouter::new(Rc::clone(&history), root).with_routes(vec![
			NativeRoute::new(
				"/a",
				Node::fragment([Node::text("A>"), native_outlet()]),
			)
			.child(NativeRoute::new("b", "B")),
		]);
		let app = Root::new(router_root(Rc::new(router)));

		// Act & Assert
		assert_eq!(app.render_to_string(), "<main>A&gt;B</main>");
		history.push("/a", Value::Null);
		assert_eq!(app.render_to_string(), "<main>A&gt;</main>");
	}
}
