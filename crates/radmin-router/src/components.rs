//! `Link` and `Navigate`.

use crate::basename::{Basename, use_basename};
use crate::engine::use_router;
use crate::hooks::{NavigateOptions, use_navigate};
use crate::location::{To, append_search_and_hash};
use radmin_view::{Element, Node, Props, Scope};
use serde_json::Value;

/// Target of a [`link`].
#[derive(Debug, Clone, PartialEq)]
struct LinkTarget(To);

/// Renders an `<a>` pointing at `to`.
pub fn link(to: impl Into<To>, children: impl IntoIterator<Item = Node>) -> Element {
	let props = Props::new().children(children).with_data(LinkTarget(to.into()));
	Element::component("Link", props, render_link)
}

fn render_link(scope: &Scope, props: &Props) -> Node {
	let basename = use_basename(scope);
	let router = use_router(scope);
	let to = props
		.data::<LinkTarget>()
		.map(|LinkTarget(to)| to.clone())
		.unwrap_or(To::Delta(0));
	let current = router.as_ref().map(|router| router.location().href());
	let url = link_href(&to, &basename, current.as_deref().unwrap_or("/"));
	let href = match &router {
		Some(router) => router.history().create_href(&url),
		None => url,
	};

	let mut anchor = Element::tag("a").attr("href", href);
	for (name, value) in &props.attrs {
		anchor = anchor.attr(name.clone(), value.clone());
	}
	for child in &props.children {
		anchor = anchor.child(child.clone());
	}
	anchor.into()
}

/// The URL a link to `to` navigates to, the way navigate would resolve it.
/// `current` is the host's current href, basename included.
pub fn link_href(to: &To, basename: &Basename, current: &str) -> String {
	match to {
		To::Delta(_) => current.to_owned(),
		To::Path(path) => basename.resolve(path),
		To::Location(location) => {
			let current_pathname = crate::location::split_href(current).0;
			let pathname = location.pathname.as_deref().unwrap_or(&current_pathname);
			let mut url = basename.resolve(pathname);
			append_search_and_hash(&mut url, location.search.as_deref(), location.hash.as_deref());
			url
		}
	}
}

/// Navigation target of a [`navigate`] element.
#[derive(Debug, Clone, PartialEq)]
struct NavigateTarget {
	to: To,
	options: NavigateOptions,
}

/// Navigates to `to` once mounted, and again whenever the target changes.
pub fn navigate(to: impl Into<To>, replace: bool, state: Option<Value>) -> Node {
	let target = NavigateTarget {
		to: to.into(),
		options: NavigateOptions { state, replace },
	};
	Node::component("Navigate", Props::new().with_data(target), |scope, props| {
		let navigate = use_navigate(scope);
		let target = props.data::<NavigateTarget>().cloned();
		scope.use_effect(target.clone(), move || {
			match (navigate, target) {
				(Ok(navigate), Some(target)) => navigate.navigate(target.to, target.options),
				(Err(err), _) => tracing::error!(error = %err, "Navigate rendered outside a router"),
				(Ok(_), None) => {}
			}
			None
		});
		Node::Empty
	})
}
