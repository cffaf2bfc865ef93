//! Default pages used when the admin is not given its own.

use crate::context::use_default_title;
use radmin_view::{Element, Node, Props};
use std::rc::Rc;
use std::time::Duration;

/// Wraps the routed content of the admin.
pub type LayoutFn = Rc<dyn Fn(Node) -> Node>;

/// The default layout: a `main` element holding the content.
pub fn default_layout() -> LayoutFn {
	Rc::new(|content| {
		Node::component("Layout", Props::new().child(content), |scope, props| {
			let title = use_default_title(scope);
			Element::tag("div")
				.attr("class", "radmin-layout")
				.child(Element::tag("header").child(Node::text(title)))
				.child(Element::tag("main").child(Node::fragment(props.children.clone())))
				.into()
		})
	})
}

pub fn default_loading() -> Node {
	Element::tag("div")
		.attr("class", "radmin-loading")
		.child(Node::text("Loading"))
		.into()
}

pub fn default_catch_all() -> Node {
	Element::tag("div")
		.attr("class", "radmin-not-found")
		.child(Node::text("Not found"))
		.into()
}

/// Shown by an admin with nothing to route yet.
pub fn default_ready() -> Node {
	Element::tag("div")
		.attr("class", "radmin-ready")
		.child(Node::text("Welcome to radmin"))
		.into()
}

/// Renders `page` only once `delay` has elapsed since mount, so fast
/// resolutions never flash it.
pub fn loading_gate(delay: Duration, page: Node) -> Node {
	let props = Props::new().element(page).with_data(delay);
	Node::component("LoadingGate", props, |scope, props| {
		let delay = props.data::<Duration>().copied().unwrap_or_default();
		if scope.use_timeout(delay) {
			props.element.as_deref().cloned().unwrap_or_default()
		} else {
			Node::Empty
		}
	})
}
